use crate::ecs::components::{Activity, Cat};

/// Which sprite sheet the renderer should loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationCue {
    Idle,
    /// The walk sheet doubles as the jump animation while playing.
    Walk,
}

/// Discrete state exposed to renderers and UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pose {
    Idle,
    Walking,
    Eating,
    Sleeping,
    Playing,
}

impl Pose {
    pub fn of(cat: &Cat) -> Self {
        match cat.activity {
            Activity::Eating { .. } => Pose::Eating,
            Activity::Sleeping { .. } => Pose::Sleeping,
            Activity::Playing { .. } => Pose::Playing,
            Activity::Idle if cat.moving => Pose::Walking,
            Activity::Idle => Pose::Idle,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Pose::Idle => "idle",
            Pose::Walking => "walking",
            Pose::Eating => "eating",
            Pose::Sleeping => "sleeping",
            Pose::Playing => "playing",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn idle_cat_is_walking_only_while_moving() {
        let mut cat = Cat::new(Vec2::ZERO);
        assert_eq!(Pose::of(&cat), Pose::Idle);
        cat.moving = true;
        assert_eq!(Pose::of(&cat), Pose::Walking);
        cat.activity = Activity::Eating { remaining: 3 };
        assert_eq!(Pose::of(&cat), Pose::Eating);
    }
}
