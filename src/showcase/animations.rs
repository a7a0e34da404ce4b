//! Tweens and frame animations side by side.
//!
//! Four easing tweens (rectangle position, circle radius, sector alpha and
//! polygon rotation) share one curve and a two second duration. Below them
//! the same four properties run as velocity tweens, and a timing tween moves
//! a hexagon along a sine wave. Two frame animations cycle coin and shape
//! frames, and a sprite character walks and jumps along a floor.
//!
//! Headless runs cycle through [`Easing::CURVES`]: once every easing tween
//! has finished, the next curve is selected and the tweens restart. The
//! sprite follows a looping [`InputScript`] in place of the keyboard.

use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::frameanimation::FrameAnimation;
use crate::components::rigidbody::RigidBody;
use crate::components::shapes::{AlphaCircleSector, Circle, Polygon, Rectangle, Tweenable};
use crate::components::sprite::{SpriteAnimations, SpriteCharacter};
use crate::components::tween::{
    Easing, TimingTrack, TweenAnimation, TweenProperties, TweenProperty,
};
use crate::events::tween::TweenFinishedEvent;
use crate::resources::spriteinput::{InputScript, InputStep, SpriteInput};
use crate::showcase::{FrameDriver, ShowcaseError};
use crate::systems::frameanimation::frame_animation_system;
use crate::systems::sprite::sprite_controller_system;
use crate::systems::tween::tween_animation_system;

/// Seconds an easing tween takes end to end.
pub const EASING_DURATION: f32 = 2.0;
/// Initial run time of the timing tween.
pub const TIMING_TOTAL: f32 = 1.5;
pub const MIN_TIMING_TOTAL: f32 = 0.5;
pub const MAX_TIMING_TOTAL: f32 = 3.5;

const COIN_FRAMES: [&str; 4] = ["coin0", "coin1", "coin2", "coin3"];
const SHAPE_FRAMES: [&str; 7] = [
    "rectangle",
    "round_rectangle",
    "circle",
    "polygon",
    "star",
    "ring",
    "cubic_curve",
];

/// Idle, walk right and jump, pause, walk back left, then jump in place.
const SPRITE_SCRIPT: [InputStep; 8] = [
    InputStep::new(60, SpriteInput::NONE),
    InputStep::new(90, SpriteInput::RIGHT),
    InputStep::new(1, SpriteInput::RIGHT.with_jump()),
    InputStep::new(59, SpriteInput::RIGHT),
    InputStep::new(30, SpriteInput::NONE),
    InputStep::new(120, SpriteInput::LEFT),
    InputStep::new(1, SpriteInput::NONE.with_jump()),
    InputStep::new(59, SpriteInput::NONE),
];

/// Frame type of both frame animations.
pub type FrameName = &'static str;

/// Finished tweens seen by the example's observer.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct TweenStats {
    pub finished: u32,
}

fn observe_tween_finished(_trigger: On<TweenFinishedEvent>, mut stats: ResMut<TweenStats>) {
    stats.finished += 1;
}

#[derive(Debug, Clone, Copy)]
struct TweenEntities {
    rect: Entity,
    circle: Entity,
    sector: Entity,
    polygon: Entity,
}

pub struct AnimationsExample {
    easing: Easing,
    auto_cycle: bool,
    schedule: Schedule,
    easing_tweens: Option<TweenEntities>,
    velocity_tweens: Option<TweenEntities>,
    timing: Option<Entity>,
    coin: Option<Entity>,
    shapes: Option<Entity>,
    sprite: Option<Entity>,
    sprite_script: Option<InputScript>,
}

impl AnimationsExample {
    pub fn new(easing: Easing) -> Self {
        Self {
            easing,
            auto_cycle: true,
            schedule: Schedule::default(),
            easing_tweens: None,
            velocity_tweens: None,
            timing: None,
            coin: None,
            shapes: None,
            sprite: None,
            sprite_script: Some(InputScript::new(SPRITE_SCRIPT)),
        }
    }

    /// Disable automatic curve cycling.
    pub fn without_auto_cycle(mut self) -> Self {
        self.auto_cycle = false;
        self
    }

    /// Leave the sprite to [`set_sprite_input`](Self::set_sprite_input).
    pub fn without_sprite_script(mut self) -> Self {
        self.sprite_script = None;
        self
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Switch to the next curve and restart the tweens.
    pub fn next_easing(&mut self, world: &mut World) {
        let index = self.curve_index().map_or(0, |i| (i + 1) % Easing::CURVES.len());
        self.select_easing(world, Easing::CURVES[index]);
    }

    /// Switch to the previous curve and restart the tweens.
    pub fn previous_easing(&mut self, world: &mut World) {
        let len = Easing::CURVES.len();
        let index = self.curve_index().map_or(len - 1, |i| (i + len - 1) % len);
        self.select_easing(world, Easing::CURVES[index]);
    }

    pub fn select_easing(&mut self, world: &mut World, easing: Easing) {
        self.easing = easing;
        if let Some(tweens) = self.easing_tweens {
            set_easing::<Rectangle>(world, tweens.rect, easing);
            set_easing::<Circle>(world, tweens.circle, easing);
            set_easing::<AlphaCircleSector>(world, tweens.sector, easing);
            set_easing::<Polygon>(world, tweens.polygon, easing);
        }
        info!("Easing curve: {}", easing.name());
        self.reset_tweens(world);
    }

    /// Restart every easing and velocity tween.
    pub fn reset_tweens(&self, world: &mut World) {
        for tweens in [self.easing_tweens, self.velocity_tweens].into_iter().flatten() {
            reset_tween::<Rectangle>(world, tweens.rect);
            reset_tween::<Circle>(world, tweens.circle);
            reset_tween::<AlphaCircleSector>(world, tweens.sector);
            reset_tween::<Polygon>(world, tweens.polygon);
        }
    }

    /// Restart the timing tween with a new total, clamped to
    /// [`MIN_TIMING_TOTAL`]..=[`MAX_TIMING_TOTAL`].
    pub fn set_timing_total(&self, world: &mut World, total: f32) -> Result<(), ShowcaseError> {
        let Some(entity) = self.timing else {
            return Ok(());
        };
        if let Some(mut tween) = world.get_mut::<TweenAnimation<Polygon>>(entity) {
            tween.set_total_execution_time(total.clamp(MIN_TIMING_TOTAL, MAX_TIMING_TOTAL))?;
        }
        Ok(())
    }

    /// Shift the coin animation's frame time, as the mouse wheel does.
    pub fn adjust_coin_speed(&self, world: &mut World, amount: f32) {
        let Some(entity) = self.coin else {
            return;
        };
        if let Some(mut anim) = world.get_mut::<FrameAnimation<FrameName>>(entity) {
            let t = anim.time_to_next_frame() + amount;
            anim.set_time_to_next_frame(t);
        }
    }

    /// Keys for the next update.
    pub fn set_sprite_input(&self, world: &mut World, input: SpriteInput) {
        world.insert_resource(input);
    }

    pub fn sprite_entity(&self) -> Option<Entity> {
        self.sprite
    }

    pub fn coin_entity(&self) -> Option<Entity> {
        self.coin
    }

    pub fn shapes_entity(&self) -> Option<Entity> {
        self.shapes
    }

    fn curve_index(&self) -> Option<usize> {
        Easing::CURVES.iter().position(|e| *e == self.easing)
    }

    fn easing_finished(&self, world: &World) -> bool {
        let Some(t) = self.easing_tweens else {
            return false;
        };
        finished::<Rectangle>(world, t.rect)
            && finished::<Circle>(world, t.circle)
            && finished::<AlphaCircleSector>(world, t.sector)
            && finished::<Polygon>(world, t.polygon)
    }
}

fn set_easing<C: Tweenable>(world: &mut World, entity: Entity, easing: Easing) {
    if let Some(mut tween) = world.get_mut::<TweenAnimation<C>>(entity) {
        tween.set_easing(easing);
    }
}

fn reset_tween<C: Tweenable>(world: &mut World, entity: Entity) {
    if let Some(mut tween) = world.get_mut::<TweenAnimation<C>>(entity) {
        tween.reset();
    }
}

fn finished<C: Tweenable>(world: &World, entity: Entity) -> bool {
    world
        .get::<TweenAnimation<C>>(entity)
        .is_some_and(|t| t.is_finished())
}

fn tween_line<C: Tweenable>(
    world: &World,
    entity: Entity,
    kind: &str,
    shape: &str,
    property: TweenProperty,
) -> Option<String> {
    let tween = world.get::<TweenAnimation<C>>(entity)?;
    let value = tween.component().get(property).unwrap_or_default();
    Some(format!(
        "{kind} {shape}: {property:?}={value:.2} {:.0}% {:?}",
        tween.percentage() * 100.0,
        tween.state()
    ))
}

fn spawn_easing_tweens(world: &mut World, easing: Easing) -> Result<TweenEntities, ShowcaseError> {
    use TweenProperty::*;

    let rect = TweenAnimation::easing(
        TweenProperties::new()
            .with_start(X, 40.0)
            .with_start(Y, 345.0)
            .with_end(X, 340.0),
        Rectangle::new(0.0, 0.0, 80.0, 80.0),
        &[X],
        easing,
        EASING_DURATION,
    )?;
    let circle = TweenAnimation::easing(
        TweenProperties::new()
            .with_start(X, 520.0)
            .with_start(Y, 385.0)
            .with_start(Radius, 10.0)
            .with_end(Radius, 40.0),
        Circle::new(0.0, 0.0, 0.0),
        &[Radius],
        easing,
        EASING_DURATION,
    )?;
    let sector = TweenAnimation::easing(
        TweenProperties::new()
            .with_start(X, 655.0)
            .with_start(Y, 385.0)
            .with_start(Alpha, 0.0)
            .with_end(Alpha, 255.0),
        AlphaCircleSector::new(0.0, 0.0, 40.0, 30.0, 330.0),
        &[Alpha],
        easing,
        EASING_DURATION,
    )?;
    let polygon = TweenAnimation::easing(
        TweenProperties::new()
            .with_start(X, 790.0)
            .with_start(Y, 385.0)
            .with_start(Angle, 0.0)
            .with_end(Angle, 360.0),
        Polygon::new(0.0, 0.0, 5, 40.0),
        &[Angle],
        easing,
        EASING_DURATION,
    )?;

    Ok(TweenEntities {
        rect: world.spawn(rect).id(),
        circle: world.spawn(circle).id(),
        sector: world.spawn(sector).id(),
        polygon: world.spawn(polygon).id(),
    })
}

fn spawn_velocity_tweens(world: &mut World) -> Result<TweenEntities, ShowcaseError> {
    use TweenProperty::*;

    let rect = TweenAnimation::velocity(
        TweenProperties::new()
            .with_start(X, 40.0)
            .with_start(Y, 435.0)
            .with_end(X, 340.0)
            .with_velocity(X, 150.0),
        Rectangle::new(0.0, 0.0, 80.0, 80.0),
        &[X],
    )?;
    let circle = TweenAnimation::velocity(
        TweenProperties::new()
            .with_start(X, 520.0)
            .with_start(Y, 475.0)
            .with_start(Radius, 10.0)
            .with_end(Radius, 40.0)
            .with_velocity(Radius, 15.0),
        Circle::new(0.0, 0.0, 0.0),
        &[Radius],
    )?;
    let sector = TweenAnimation::velocity(
        TweenProperties::new()
            .with_start(X, 655.0)
            .with_start(Y, 475.0)
            .with_start(Alpha, 0.0)
            .with_end(Alpha, 255.0)
            .with_velocity(Alpha, 128.0),
        AlphaCircleSector::new(0.0, 0.0, 40.0, 30.0, 330.0),
        &[Alpha],
    )?;
    let polygon = TweenAnimation::velocity(
        TweenProperties::new()
            .with_start(X, 790.0)
            .with_start(Y, 475.0)
            .with_start(Angle, 0.0)
            .with_end(Angle, 360.0)
            .with_velocity(Angle, 180.0),
        Polygon::new(0.0, 0.0, 5, 40.0),
        &[Angle],
    )?;

    Ok(TweenEntities {
        rect: world.spawn(rect).id(),
        circle: world.spawn(circle).id(),
        sector: world.spawn(sector).id(),
        polygon: world.spawn(polygon).id(),
    })
}

fn spawn_timing_tween(world: &mut World) -> Result<Entity, ShowcaseError> {
    use TweenProperty::*;

    let tween = TweenAnimation::timing(
        TweenProperties::new()
            .with_start(X, 280.0)
            .with_start(Y, 700.0)
            .with_start(Angle, 0.0)
            .with_start(Radius, 10.0)
            .with_velocity(X, 200.0)
            .with_velocity(Angle, 200.0)
            .with_velocity(Radius, 15.0),
        Polygon::new(0.0, 0.0, 6, 10.0),
        &[
            TimingTrack::Linear(X),
            TimingTrack::Sine {
                property: Y,
                amplitude: 50.0,
                phase: Angle,
            },
            TimingTrack::Linear(Angle),
            TimingTrack::Linear(Radius),
        ],
        TIMING_TOTAL,
    )?;
    Ok(world.spawn(tween).id())
}

impl FrameDriver for AnimationsExample {
    fn title(&self) -> &str {
        "Animations"
    }

    fn create(&mut self, world: &mut World) -> Result<(), ShowcaseError> {
        world.init_resource::<TweenStats>();
        world.spawn(Observer::new(observe_tween_finished));

        self.easing_tweens = Some(spawn_easing_tweens(world, self.easing)?);
        self.velocity_tweens = Some(spawn_velocity_tweens(world)?);
        self.timing = Some(spawn_timing_tween(world)?);

        self.coin = Some(
            world
                .spawn(FrameAnimation::<FrameName>::new(0.1, COIN_FRAMES.to_vec()))
                .id(),
        );
        self.shapes = Some(
            world
                .spawn(FrameAnimation::<FrameName>::new(0.5, SHAPE_FRAMES.to_vec()))
                .id(),
        );

        world.insert_resource(SpriteInput::default());
        self.sprite = Some(
            world
                .spawn((
                    SpriteCharacter::default(),
                    RigidBody::default(),
                    SpriteAnimations::new(),
                ))
                .id(),
        );
        if let Some(script) = &mut self.sprite_script {
            script.restart();
        }

        self.schedule = Schedule::default();
        self.schedule.add_systems((
            tween_animation_system::<Rectangle>,
            tween_animation_system::<Circle>,
            tween_animation_system::<AlphaCircleSector>,
            tween_animation_system::<Polygon>,
            frame_animation_system::<FrameName>,
            sprite_controller_system,
        ));
        Ok(())
    }

    fn update(&mut self, world: &mut World, _delta: f32) {
        if let Some(script) = &mut self.sprite_script {
            world.insert_resource(script.next_input());
        }
        self.schedule.run(world);
        if self.auto_cycle && self.easing_finished(world) {
            debug!("Easing tweens finished with {}", self.easing.name());
            self.next_easing(world);
        }
    }

    fn draw(&self, world: &World) -> Vec<String> {
        use TweenProperty::{Alpha, Angle, Radius, X};

        let mut lines = vec![format!("easing: {}", self.easing.name())];

        for (kind, tweens) in [("easing", self.easing_tweens), ("velocity", self.velocity_tweens)] {
            let Some(t) = tweens else { continue };
            lines.extend(
                [
                    tween_line::<Rectangle>(world, t.rect, kind, "rectangle", X),
                    tween_line::<Circle>(world, t.circle, kind, "circle", Radius),
                    tween_line::<AlphaCircleSector>(world, t.sector, kind, "sector", Alpha),
                    tween_line::<Polygon>(world, t.polygon, kind, "polygon", Angle),
                ]
                .into_iter()
                .flatten(),
            );
        }

        if let Some(tween) = self.timing.and_then(|e| world.get::<TweenAnimation<Polygon>>(e)) {
            let p = tween.component();
            lines.push(format!(
                "timing polygon: x={:.1} y={:.1} rotation={:.1} radius={:.1} time={:.2}/{:.2}s",
                p.x,
                p.y,
                p.rotation,
                p.radius,
                tween.execution_time(),
                tween.total_execution_time().unwrap_or_default()
            ));
        }

        for (label, entity) in [("coin", self.coin), ("shapes", self.shapes)] {
            if let Some(anim) = entity.and_then(|e| world.get::<FrameAnimation<FrameName>>(e)) {
                lines.push(format!(
                    "{label}: {} ({}/{}) {:?}",
                    anim.current_frame().copied().unwrap_or("-"),
                    anim.current_frame_position() + 1,
                    anim.frame_count(),
                    anim.state()
                ));
            }
        }

        if let Some(sprite) = self.sprite.and_then(|e| world.get::<SpriteCharacter>(e)) {
            let pose = sprite.pose();
            let column = self
                .sprite
                .and_then(|e| world.get::<SpriteAnimations>(e))
                .and_then(|a| a.get(pose).current_frame().copied())
                .unwrap_or_default();
            lines.push(format!(
                "sprite: {} column {} at ({:.1}, {:.1})",
                pose.name(),
                column,
                sprite.position.x,
                sprite.position.y
            ));
        }

        if let Some(stats) = world.get_resource::<TweenStats>() {
            lines.push(format!("finished tweens: {}", stats.finished));
        }
        lines
    }
}
