//! # Display Management
//!
//! Screen management and 2D rendering of a running session using macroquad.

use crate::game::{
    player_sprite_frame, ActorInstance, BattleSession, GameSession, InteractionMenu, Mode,
    Position, SpriteConfig, SpriteStrategy, WALK_FRAMES,
};
use crate::generation::{DirectoryCatalog, SceneState};
use crate::rendering::{
    bar_fraction, draw_bar, draw_lines, draw_panel, menu_rows, wrap_text, TextureCache,
};
use crate::TaleResult;
use macroquad::prelude::*;

/// On-screen height of the player and actor sprites.
const SPRITE_HEIGHT: f32 = 96.0;
/// Side of the avatar square in the dialogue box.
const AVATAR_SIZE: f32 = 96.0;

/// Top-left world coordinate of the view so that `focus` is centered, clamped so
/// the view never leaves the world.
///
/// # Examples
///
/// ```
/// use taleplay::{camera_offset, Position};
///
/// let world = (2560.0, 1440.0);
/// let screen = (800.0, 600.0);
/// assert_eq!(camera_offset(Position::new(1280.0, 720.0), world, screen), (880.0, 420.0));
/// assert_eq!(camera_offset(Position::origin(), world, screen), (0.0, 0.0));
/// ```
pub fn camera_offset(focus: Position, world: (f32, f32), screen: (f32, f32)) -> (f32, f32) {
    let axis = |f: f32, world: f32, screen: f32| {
        if world <= screen {
            0.0
        } else {
            (f - screen / 2.0).clamp(0.0, world - screen)
        }
    };
    (axis(focus.x, world.0, screen.0), axis(focus.y, world.1, screen.1))
}

/// Macroquad display manager for the game.
///
/// Draws the scene, its actors and the player, then the overlays for whichever
/// interaction mode is active.
pub struct MacroquadDisplay {
    /// Message history
    pub messages: Vec<String>,
    /// Maximum number of messages to keep
    pub max_messages: usize,
    pub textures: TextureCache,
}

impl MacroquadDisplay {
    pub async fn new(catalog: DirectoryCatalog) -> TaleResult<Self> {
        Ok(Self {
            messages: Vec::new(),
            max_messages: 100,
            textures: TextureCache::new(catalog),
        })
    }

    pub async fn load_player_textures(&mut self, sprites: &SpriteConfig) {
        let mut assets: Vec<&str> = vec![
            sprites.player_sheet.as_str(),
            sprites.player_avatar.as_str(),
        ];
        assets.extend(sprites.player_strips.iter().map(String::as_str));
        self.textures.ensure_all(assets).await;
    }

    /// Loads the background and every actor image of a scene.
    pub async fn load_scene_textures(&mut self, scene: &SceneState) {
        let mut assets: Vec<&str> = vec![scene.background.as_str()];
        for actor in &scene.actors {
            assets.push(actor.sprite.as_str());
            assets.push(actor.avatar.as_str());
        }
        self.textures.ensure_all(assets).await;
    }

    /// Adds a message to the message history.
    pub fn add_message(&mut self, message: String) {
        self.messages.push(message);

        if self.messages.len() > self.max_messages {
            self.messages.remove(0);
        }
    }

    /// Draws the opening remarks at the given opacity.
    pub fn render_opening(&self, text: &str, alpha: f32) {
        clear_background(BLACK);
        let color = Color::new(1.0, 1.0, 1.0, alpha);
        let lines = wrap_text(text, 60);
        let line_height = 32.0;
        let top = screen_height() / 2.0 - lines.len() as f32 * line_height / 2.0;

        for (i, line) in lines.iter().enumerate() {
            let size = measure_text(line, None, 28, 1.0);
            draw_text(
                line,
                (screen_width() - size.width) / 2.0,
                top + i as f32 * line_height,
                28.0,
                color,
            );
        }
    }

    /// Renders the complete game screen.
    pub fn render_game(&self, session: &GameSession) {
        clear_background(BLACK);

        let world = &session.config().world;
        let cam = camera_offset(
            session.player().position,
            (world.width, world.height),
            (screen_width(), screen_height()),
        );
        let scene = session.scene();

        self.render_background(scene, cam, (world.width, world.height));
        for actor in &scene.actors {
            self.render_actor(actor, cam);
        }
        if let Some(target) = session.prompt_target().and_then(|id| scene.actor(id)) {
            if *session.mode() == Mode::FreeRoam {
                self.render_prompt(target, cam);
            }
        }
        self.render_transition_arrows(scene, cam, (world.width, world.height));
        self.render_player(session, cam);

        self.render_hud(session);
        match session.mode() {
            Mode::FreeRoam => {}
            Mode::Menu(menu) => {
                if let Some(target) = scene.actor(menu.target()) {
                    self.render_menu(menu, target, cam);
                }
            }
            Mode::Dialogue(dialogue) => {
                if let Some(line) = dialogue.current() {
                    self.render_dialogue(&line.speaker, &line.text, &line.avatar);
                }
            }
            Mode::Battle(battle) => self.render_battle(session, battle),
        }
        if session.profile_visible() {
            self.render_profile(session);
        }
        self.render_messages();
    }

    fn render_background(&self, scene: &SceneState, cam: (f32, f32), world: (f32, f32)) {
        if let Some(texture) = self.textures.get(&scene.background) {
            draw_texture_ex(
                texture,
                -cam.0,
                -cam.1,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(world.0, world.1)),
                    ..Default::default()
                },
            );
            return;
        }

        // placeholder: flat ground with a grid
        let ground = Color::new(0.16, 0.3, 0.18, 1.0);
        draw_rectangle(-cam.0, -cam.1, world.0, world.1, ground);
        let step = 128.0;
        let grid = Color::new(1.0, 1.0, 1.0, 0.08);
        let mut x = 0.0;
        while x <= world.0 {
            draw_line(x - cam.0, -cam.1, x - cam.0, world.1 - cam.1, 1.0, grid);
            x += step;
        }
        let mut y = 0.0;
        while y <= world.1 {
            draw_line(-cam.0, y - cam.1, world.0 - cam.0, y - cam.1, 1.0, grid);
            y += step;
        }
        for building in &scene.obstacles {
            draw_rectangle(
                building.x - cam.0,
                building.y - cam.1,
                building.w,
                building.h,
                Color::new(0.35, 0.27, 0.2, 1.0),
            );
        }
    }

    fn render_actor(&self, actor: &ActorInstance, cam: (f32, f32)) {
        let tint = if actor.disabled {
            Color::new(0.45, 0.45, 0.45, 1.0)
        } else {
            WHITE
        };
        let x = actor.position.x - cam.0;
        let y = actor.position.y - cam.1;

        match self.textures.get(&actor.sprite) {
            Some(texture) => {
                let (w, h) = scaled_size(texture.width(), texture.height(), SPRITE_HEIGHT);
                draw_texture_ex(
                    texture,
                    x - w / 2.0,
                    y - h / 2.0,
                    tint,
                    DrawTextureParams {
                        dest_size: Some(vec2(w, h)),
                        ..Default::default()
                    },
                );
            }
            None => {
                let color = if actor.is_minion() { MAROON } else { BLUE };
                draw_rectangle(
                    actor.footprint.x - cam.0,
                    actor.footprint.y - cam.1,
                    actor.footprint.w,
                    actor.footprint.h,
                    Color::new(color.r * tint.r, color.g * tint.g, color.b * tint.b, 1.0),
                );
            }
        }

        let size = measure_text(&actor.name, None, 16, 1.0);
        draw_text(
            &actor.name,
            x - size.width / 2.0,
            y - SPRITE_HEIGHT / 2.0 - 6.0,
            16.0,
            tint,
        );
    }

    fn render_prompt(&self, target: &ActorInstance, cam: (f32, f32)) {
        let x = target.position.x - cam.0;
        let y = target.position.y - cam.1 - SPRITE_HEIGHT / 2.0 - 24.0;
        let text = "SPACE";
        let size = measure_text(text, None, 18, 1.0);
        let left = x - size.width / 2.0;
        draw_rectangle(left - 4.0, y - 16.0, size.width + 8.0, 22.0, BLACK);
        draw_text(text, x - size.width / 2.0, y, 18.0, YELLOW);
    }

    fn render_transition_arrows(&self, scene: &SceneState, cam: (f32, f32), world: (f32, f32)) {
        let mid = world.1 / 2.0 - cam.1;
        let color = Color::new(1.0, 1.0, 0.4, 0.8);
        if scene.has_next {
            let x = world.0 - 30.0 - cam.0;
            draw_triangle(
                vec2(x + 20.0, mid),
                vec2(x - 10.0, mid - 25.0),
                vec2(x - 10.0, mid + 25.0),
                color,
            );
        }
        if scene.has_prev {
            let x = 30.0 - cam.0;
            draw_triangle(
                vec2(x - 20.0, mid),
                vec2(x + 10.0, mid - 25.0),
                vec2(x + 10.0, mid + 25.0),
                color,
            );
        }
    }

    fn render_player(&self, session: &GameSession, cam: (f32, f32)) {
        let sprites = &session.config().sprites;
        let frame = player_sprite_frame(sprites, session.animation());
        let pos = session.player().position;
        let (x, y) = (pos.x - cam.0, pos.y - cam.1);

        let Some(texture) = self.textures.get(&frame.asset) else {
            let movement = &session.config().movement;
            draw_rectangle(
                x - movement.footprint_width / 2.0,
                y - movement.footprint_height / 2.0,
                movement.footprint_width,
                movement.footprint_height,
                GREEN,
            );
            return;
        };

        let frames = match sprites.strategy {
            SpriteStrategy::SingleSheet => 4,
            SpriteStrategy::DirectionalStrips => WALK_FRAMES,
        };
        let frame_w = texture.width() / frames as f32;
        let (w, h) = scaled_size(frame_w, texture.height(), SPRITE_HEIGHT);
        draw_texture_ex(
            texture,
            x - w / 2.0,
            y - h / 2.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(w, h)),
                source: Some(Rect::new(
                    frame.frame as f32 * frame_w,
                    0.0,
                    frame_w,
                    texture.height(),
                )),
                flip_x: frame.flip_x,
                ..Default::default()
            },
        );
    }

    fn render_hud(&self, session: &GameSession) {
        let player = session.player();
        let rules = &session.config().progression;
        draw_panel(10.0, 10.0, 240.0, 86.0);
        draw_text(
            &format!("{}  Lv {}", player.name, player.level),
            20.0,
            32.0,
            20.0,
            WHITE,
        );
        draw_bar(20.0, 42.0, 220.0, 14.0, bar_fraction(player.hp, player.max_hp), RED);
        draw_bar(20.0, 64.0, 220.0, 10.0, player.experience_fraction(rules), SKYBLUE);

        if let Some(location) = session
            .dataset()
            .get(session.scene().index)
            .map(|d| d.location.as_str())
            .filter(|l| !l.is_empty())
        {
            draw_text(location, 20.0, 90.0, 16.0, LIGHTGRAY);
        }
    }

    fn render_menu(&self, menu: &InteractionMenu, target: &ActorInstance, cam: (f32, f32)) {
        let rows = menu_rows(menu);
        let x = target.position.x - cam.0 + 40.0;
        let y = target.position.y - cam.1 - 40.0;
        draw_panel(x, y, 120.0, 16.0 + rows.len() as f32 * 26.0);

        for (i, row) in rows.iter().enumerate() {
            let line_y = y + 28.0 + i as f32 * 26.0;
            let (prefix, color) = if row.selected {
                ("> ", YELLOW)
            } else {
                ("  ", WHITE)
            };
            let label = format!("{}{}", prefix, row.label);
            draw_text(&label, x + 10.0, line_y, 22.0, color);
        }
    }

    fn render_dialogue(&self, speaker: &str, text: &str, avatar: &str) {
        let h = 150.0;
        let y = screen_height() - h - 100.0;
        let w = screen_width() - 40.0;
        draw_panel(20.0, y, w, h);

        let text_x = if let Some(texture) = self.textures.get(avatar) {
            draw_texture_ex(
                texture,
                35.0,
                y + (h - AVATAR_SIZE) / 2.0,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(AVATAR_SIZE, AVATAR_SIZE)),
                    ..Default::default()
                },
            );
            50.0 + AVATAR_SIZE
        } else {
            35.0
        };

        draw_text(speaker, text_x, y + 30.0, 24.0, YELLOW);
        let max_chars = ((w - text_x) / 10.0).max(10.0) as usize;
        draw_lines(&wrap_text(text, max_chars), text_x, y + 58.0, 20.0, WHITE);
        draw_text("SPACE", 20.0 + w - 70.0, y + h - 12.0, 16.0, GRAY);
    }

    fn render_battle(&self, session: &GameSession, battle: &BattleSession) {
        let w = 420.0;
        let h = 180.0;
        let x = (screen_width() - w) / 2.0;
        let y = (screen_height() - h) / 2.0;
        draw_panel(x, y, w, h);

        let player = session.player();
        let target = battle.target_stats();

        draw_text(&player.name, x + 20.0, y + 36.0, 20.0, WHITE);
        let player_fill = bar_fraction(player.hp, player.max_hp);
        draw_bar(x + 20.0, y + 46.0, 160.0, 14.0, player_fill, GREEN);
        draw_text(
            &format!("{} / {}", player.hp, player.max_hp),
            x + 20.0,
            y + 78.0,
            16.0,
            LIGHTGRAY,
        );

        draw_text(battle.target_name(), x + w - 180.0, y + 36.0, 20.0, WHITE);
        let target_fill = bar_fraction(target.hp, target.max_hp);
        draw_bar(x + w - 180.0, y + 46.0, 160.0, 14.0, target_fill, RED);
        draw_text(
            &format!("{} / {}", target.hp, target.max_hp),
            x + w - 180.0,
            y + 78.0,
            16.0,
            LIGHTGRAY,
        );

        let log = battle.log();
        let size = measure_text(log, None, 28, 1.0);
        draw_text(log, x + (w - size.width) / 2.0, y + 140.0, 28.0, YELLOW);
    }

    fn render_profile(&self, session: &GameSession) {
        let rules = &session.config().progression;
        let player = session.player();
        let w = 280.0;
        let x = screen_width() - w - 10.0;
        draw_panel(x, 10.0, w, 260.0);

        let bottom = draw_lines(&player.profile_lines(rules), x + 15.0, 36.0, 20.0, WHITE);
        let fill = player.experience_fraction(rules);
        draw_bar(x + 15.0, bottom - 8.0, w - 30.0, 10.0, fill, SKYBLUE);
        if player.skill_points > 0 {
            let hint = "1: HP  2: Attack  3: Defense";
            draw_text(hint, x + 15.0, bottom + 22.0, 16.0, YELLOW);
        }
    }

    /// Renders the message area.
    fn render_messages(&self) {
        let message_area_y = screen_height() - 80.0;
        let message_count = 3;
        let line_height = 18.0;

        draw_rectangle(
            0.0,
            message_area_y - 10.0,
            screen_width(),
            90.0,
            Color::new(0.0, 0.0, 0.0, 0.8),
        );

        let start_index = self.messages.len().saturating_sub(message_count);
        for (i, message) in self.messages.iter().skip(start_index).enumerate() {
            let y = message_area_y + 8.0 + i as f32 * line_height;
            draw_text(message, 10.0, y, 16.0, WHITE);
        }
    }
}

/// Size of an image scaled to a target height, keeping its aspect ratio.
fn scaled_size(width: f32, height: f32, target_height: f32) -> (f32, f32) {
    if height <= 0.0 {
        return (target_height, target_height);
    }
    (width * target_height / height, target_height)
}
