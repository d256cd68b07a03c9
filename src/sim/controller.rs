//! Paddle controllers
//!
//! A controller looks at a read-only view of the field and answers with a
//! vertical delta for its paddle. It never moves the paddle itself; the match
//! applies the delta and clamps the result.

use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use super::state::{Arena, Ball, Paddle};
use crate::settings::{ControlKind, MatchSettings};

/// Held direction keys for one paddle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaddleIntent {
    pub up: bool,
    pub down: bool,
}

impl PaddleIntent {
    pub const IDLE: PaddleIntent = PaddleIntent {
        up: false,
        down: false,
    };

    pub fn up() -> Self {
        Self {
            up: true,
            down: false,
        }
    }

    pub fn down() -> Self {
        Self {
            up: false,
            down: true,
        }
    }
}

/// Everything a controller may look at on one tick
#[derive(Debug, Clone, Copy)]
pub struct ControlView<'a> {
    pub ball: &'a Ball,
    pub paddle: &'a Paddle,
    pub arena: &'a Arena,
    pub intent: PaddleIntent,
}

/// Per-match AI personality
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AiProfile {
    /// Multiplier on the paddle's base speed
    pub skill_factor: f32,
    /// Probability of sitting out a tick
    pub reaction_delay: f32,
}

impl AiProfile {
    /// Draw a fresh personality from the configured ranges
    pub fn draw(settings: &MatchSettings, rng: &mut impl RandomSource) -> Self {
        let skill_factor = rng.next_in(settings.ai_skill_min, settings.ai_skill_max);
        let reaction_delay = rng.next_in(settings.ai_delay_min, settings.ai_delay_max);
        Self {
            skill_factor,
            reaction_delay,
        }
    }

    fn velocity(&self, view: &ControlView<'_>, rng: &mut impl RandomSource) -> f32 {
        // Missed reaction this tick
        if rng.next_unit() <= self.reaction_delay {
            return 0.0;
        }
        let step = view.paddle.speed * self.skill_factor;
        let center = view.paddle.center_y();
        if view.ball.pos.y < center {
            -step
        } else if view.ball.pos.y > center {
            step
        } else {
            0.0
        }
    }
}

/// Controller bound to one paddle for a whole match
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Controller {
    /// Follows the held keys
    Human,
    /// Chases the ball with a personality
    Ai(AiProfile),
}

impl Controller {
    /// Build the controller for a binding, drawing an AI profile if needed
    pub fn bind(kind: ControlKind, settings: &MatchSettings, rng: &mut impl RandomSource) -> Self {
        match kind {
            ControlKind::Human => Controller::Human,
            ControlKind::Ai => Controller::Ai(AiProfile::draw(settings, rng)),
        }
    }

    pub fn kind(&self) -> ControlKind {
        match self {
            Controller::Human => ControlKind::Human,
            Controller::Ai(_) => ControlKind::Ai,
        }
    }

    pub fn profile(&self) -> Option<&AiProfile> {
        match self {
            Controller::Human => None,
            Controller::Ai(profile) => Some(profile),
        }
    }

    /// Vertical delta requested for this tick.
    ///
    /// AI controllers consume exactly one random sample per call; human
    /// controllers consume none.
    pub fn compute_velocity(&self, view: &ControlView<'_>, rng: &mut impl RandomSource) -> f32 {
        match self {
            Controller::Human => human_velocity(view),
            Controller::Ai(profile) => profile.velocity(view, rng),
        }
    }
}

fn human_velocity(view: &ControlView<'_>) -> f32 {
    let paddle = view.paddle;
    if view.intent.up && paddle.y > 0.0 {
        -paddle.speed
    } else if view.intent.down && paddle.y < paddle.max_y(view.arena) {
        paddle.speed
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{ScriptedRng, SeededRng};
    use crate::sim::state::Side;
    use glam::Vec2;

    fn field() -> (MatchSettings, Arena, Paddle, Ball) {
        let settings = MatchSettings::default();
        let arena = Arena::new(800.0, 600.0);
        let paddle = Paddle::centered(Side::Left, &arena, &settings);
        let ball = Ball::new(Vec2::new(400.0, 300.0), Vec2::new(4.0, 4.0), 10.0);
        (settings, arena, paddle, ball)
    }

    fn view<'a>(
        ball: &'a Ball,
        paddle: &'a Paddle,
        arena: &'a Arena,
        intent: PaddleIntent,
    ) -> ControlView<'a> {
        ControlView {
            ball,
            paddle,
            arena,
            intent,
        }
    }

    #[test]
    fn test_human_follows_intent() {
        let (_s, arena, paddle, ball) = field();
        let mut rng = ScriptedRng::new(&[0.5]);
        let human = Controller::Human;

        let up = human.compute_velocity(&view(&ball, &paddle, &arena, PaddleIntent::up()), &mut rng);
        let down =
            human.compute_velocity(&view(&ball, &paddle, &arena, PaddleIntent::down()), &mut rng);
        let idle =
            human.compute_velocity(&view(&ball, &paddle, &arena, PaddleIntent::IDLE), &mut rng);
        assert_eq!(up, -10.0);
        assert_eq!(down, 10.0);
        assert_eq!(idle, 0.0);
    }

    #[test]
    fn test_human_up_wins_when_both_held() {
        let (_s, arena, paddle, ball) = field();
        let mut rng = ScriptedRng::new(&[0.5]);
        let both = PaddleIntent {
            up: true,
            down: true,
        };
        let v = Controller::Human.compute_velocity(&view(&ball, &paddle, &arena, both), &mut rng);
        assert_eq!(v, -10.0);
    }

    #[test]
    fn test_human_stops_at_edges() {
        let (_s, arena, mut paddle, ball) = field();
        let mut rng = ScriptedRng::new(&[0.5]);
        paddle.y = 0.0;
        let v = Controller::Human
            .compute_velocity(&view(&ball, &paddle, &arena, PaddleIntent::up()), &mut rng);
        assert_eq!(v, 0.0);

        paddle.y = 500.0;
        let v = Controller::Human
            .compute_velocity(&view(&ball, &paddle, &arena, PaddleIntent::down()), &mut rng);
        assert_eq!(v, 0.0);

        // Both held at the top edge: up is blocked, down still applies
        paddle.y = 0.0;
        let both = PaddleIntent {
            up: true,
            down: true,
        };
        let v = Controller::Human.compute_velocity(&view(&ball, &paddle, &arena, both), &mut rng);
        assert_eq!(v, 10.0);
    }

    #[test]
    fn test_ai_chases_ball() {
        let (_s, arena, paddle, mut ball) = field();
        let ai = Controller::Ai(AiProfile {
            skill_factor: 0.8,
            reaction_delay: 0.1,
        });
        let mut rng = ScriptedRng::new(&[0.9]);

        ball.pos.y = 100.0;
        let v = ai.compute_velocity(&view(&ball, &paddle, &arena, PaddleIntent::IDLE), &mut rng);
        assert!((v + 8.0).abs() < 1e-6);

        ball.pos.y = 450.0;
        let v = ai.compute_velocity(&view(&ball, &paddle, &arena, PaddleIntent::IDLE), &mut rng);
        assert!((v - 8.0).abs() < 1e-6);

        ball.pos.y = paddle.center_y();
        let v = ai.compute_velocity(&view(&ball, &paddle, &arena, PaddleIntent::IDLE), &mut rng);
        assert_eq!(v, 0.0);
    }

    #[test]
    fn test_ai_skips_tick_within_reaction_delay() {
        let (_s, arena, paddle, mut ball) = field();
        ball.pos.y = 50.0;
        let ai = Controller::Ai(AiProfile {
            skill_factor: 1.0,
            reaction_delay: 0.1,
        });
        // Sample equal to the delay still counts as a miss
        let mut rng = ScriptedRng::new(&[0.05, 0.1, 0.11]);
        let v = view(&ball, &paddle, &arena, PaddleIntent::IDLE);
        assert_eq!(ai.compute_velocity(&v, &mut rng), 0.0);
        assert_eq!(ai.compute_velocity(&v, &mut rng), 0.0);
        assert_eq!(ai.compute_velocity(&v, &mut rng), -10.0);
    }

    #[test]
    fn test_ai_ignores_keys() {
        let (_s, arena, paddle, mut ball) = field();
        ball.pos.y = 500.0;
        let ai = Controller::Ai(AiProfile {
            skill_factor: 1.0,
            reaction_delay: 0.0,
        });
        let mut rng = ScriptedRng::new(&[0.5]);
        let v = ai.compute_velocity(&view(&ball, &paddle, &arena, PaddleIntent::up()), &mut rng);
        assert_eq!(v, 10.0);
    }

    #[test]
    fn test_profiles_drawn_within_ranges() {
        let settings = MatchSettings::default();
        let mut rng = SeededRng::new(2024);
        for _ in 0..500 {
            let profile = AiProfile::draw(&settings, &mut rng);
            assert!((0.7..=1.2).contains(&profile.skill_factor));
            assert!((0.05..=0.15).contains(&profile.reaction_delay));
        }
    }

    #[test]
    fn test_bind() {
        let settings = MatchSettings::default();
        let mut rng = SeededRng::new(1);
        let human = Controller::bind(ControlKind::Human, &settings, &mut rng);
        let ai = Controller::bind(ControlKind::Ai, &settings, &mut rng);
        assert_eq!(human.kind(), ControlKind::Human);
        assert!(human.profile().is_none());
        assert_eq!(ai.kind(), ControlKind::Ai);
        assert!(ai.profile().is_some());
    }
}
