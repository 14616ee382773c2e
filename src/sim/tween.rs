//! Timed property animations
//!
//! An [`Action`] is a small state machine that drives an actor's
//! [`Appearance`] over time. Leaf actions interpolate one property between
//! the value it had when the action started and a target value; composite
//! actions run children one after another ([`Action::sequence`]), side by
//! side ([`Action::parallel`]) or in an endless loop ([`Action::forever`]).
//!
//! Everything is advanced synchronously by [`Action::act`] with the frame
//! delta. Time left over when a step finishes mid-frame is handed to the
//! next step, so a sequence of zero-duration steps completes in one frame.

/// Visual properties that actions are allowed to change
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    /// RGBA tint, each channel in `[0, 1]`
    pub color: [f32; 4],
    /// Rotation around the origin in degrees, counter-clockwise
    pub rotation: f32,
    /// Scale around the origin
    pub scale: [f32; 2],
    pub visible: bool,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0, 1.0],
            rotation: 0.0,
            scale: [1.0, 1.0],
            visible: true,
        }
    }
}

/// Values that can be linearly interpolated
pub trait Interpolate: Copy {
    fn interpolate(self, to: Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(self, to: Self, t: f32) -> Self {
        super::geometry::lerp(self, to, t)
    }
}

impl<const N: usize> Interpolate for [f32; N] {
    fn interpolate(self, to: Self, t: f32) -> Self {
        std::array::from_fn(|i| self[i].interpolate(to[i], t))
    }
}

/// Outcome of advancing an action by one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Progress {
    Running,
    /// The action completed; `leftover` seconds of the frame were not used
    Finished { leftover: f32 },
}

impl Progress {
    pub fn is_finished(&self) -> bool {
        matches!(self, Progress::Finished { .. })
    }
}

/// Interpolation from a captured start value to a fixed end value
#[derive(Debug, Clone, PartialEq)]
pub struct Tween<T> {
    from: Option<T>,
    to: T,
    duration: f32,
    elapsed: f32,
}

impl<T: Interpolate> Tween<T> {
    pub fn new(to: T, duration: f32) -> Self {
        Self {
            from: None,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
        }
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Advances the tween, returning the new value of the driven property
    ///
    /// The start value is captured from `current` on the first call.
    fn advance(&mut self, dt: f32, current: T) -> (T, Progress) {
        let from = *self.from.get_or_insert(current);
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            let leftover = (self.elapsed - self.duration).max(0.0);
            (self.to, Progress::Finished { leftover })
        } else {
            let t = self.elapsed / self.duration;
            (from.interpolate(self.to, t), Progress::Running)
        }
    }
}

/// A declarative animation attached to an actor
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Alpha(Tween<f32>),
    Color(Tween<[f32; 4]>),
    ScaleTo(Tween<[f32; 2]>),
    /// Relative rotation; `applied` is the fraction of `amount` already added
    RotateBy {
        amount: f32,
        duration: f32,
        elapsed: f32,
        applied: f32,
    },
    Visible(bool),
    Sequence {
        steps: Vec<Action>,
        current: usize,
    },
    Parallel {
        branches: Vec<Action>,
        finished: Vec<bool>,
    },
    /// `running` is a fresh copy of `body` each time around the loop
    Forever {
        body: Box<Action>,
        running: Box<Action>,
    },
}

impl Action {
    /// Tween alpha to `to`; a zero duration sets it immediately
    pub fn alpha(to: f32, duration: f32) -> Self {
        Action::Alpha(Tween::new(to, duration))
    }

    pub fn fade_in(duration: f32) -> Self {
        Self::alpha(1.0, duration)
    }

    pub fn fade_out(duration: f32) -> Self {
        Self::alpha(0.0, duration)
    }

    pub fn show() -> Self {
        Action::Visible(true)
    }

    pub fn hide() -> Self {
        Action::Visible(false)
    }

    /// Tween all four color channels to `to`
    pub fn color(to: [f32; 4], duration: f32) -> Self {
        Action::Color(Tween::new(to, duration))
    }

    /// Rotate by `degrees` relative to the rotation at any point in time
    pub fn rotate_by(degrees: f32, duration: f32) -> Self {
        Action::RotateBy {
            amount: degrees,
            duration: duration.max(0.0),
            elapsed: 0.0,
            applied: 0.0,
        }
    }

    pub fn scale_to(x: f32, y: f32, duration: f32) -> Self {
        Action::ScaleTo(Tween::new([x, y], duration))
    }

    pub fn sequence(steps: Vec<Action>) -> Self {
        Action::Sequence { steps, current: 0 }
    }

    pub fn parallel(branches: Vec<Action>) -> Self {
        let finished = vec![false; branches.len()];
        Action::Parallel { branches, finished }
    }

    pub fn forever(body: Action) -> Self {
        Action::Forever {
            running: Box::new(body.clone()),
            body: Box::new(body),
        }
    }

    /// Nominal length of one run of this action in seconds
    pub fn duration(&self) -> f32 {
        match self {
            Action::Alpha(t) => t.duration(),
            Action::Color(t) => t.duration(),
            Action::ScaleTo(t) => t.duration(),
            Action::RotateBy { duration, .. } => *duration,
            Action::Visible(_) => 0.0,
            Action::Sequence { steps, .. } => steps.iter().map(Action::duration).sum(),
            Action::Parallel { branches, .. } => {
                branches.iter().map(Action::duration).fold(0.0, f32::max)
            }
            Action::Forever { .. } => f32::INFINITY,
        }
    }

    /// Advances the action by `dt` seconds, mutating `target`
    pub fn act(&mut self, dt: f32, target: &mut Appearance) -> Progress {
        match self {
            Action::Alpha(tween) => {
                let (alpha, progress) = tween.advance(dt, target.color[3]);
                target.color[3] = alpha;
                progress
            }
            Action::Color(tween) => {
                let (color, progress) = tween.advance(dt, target.color);
                target.color = color;
                progress
            }
            Action::ScaleTo(tween) => {
                let (scale, progress) = tween.advance(dt, target.scale);
                target.scale = scale;
                progress
            }
            Action::RotateBy {
                amount,
                duration,
                elapsed,
                applied,
            } => {
                *elapsed += dt;
                let fraction = if *duration <= 0.0 {
                    1.0
                } else {
                    (*elapsed / *duration).min(1.0)
                };
                target.rotation += *amount * (fraction - *applied);
                *applied = fraction;

                if *elapsed >= *duration {
                    Progress::Finished {
                        leftover: (*elapsed - *duration).max(0.0),
                    }
                } else {
                    Progress::Running
                }
            }
            Action::Visible(visible) => {
                target.visible = *visible;
                Progress::Finished { leftover: dt }
            }
            Action::Sequence { steps, current } => {
                let mut remaining = dt;
                while let Some(step) = steps.get_mut(*current) {
                    match step.act(remaining, target) {
                        Progress::Running => return Progress::Running,
                        Progress::Finished { leftover } => {
                            *current += 1;
                            remaining = leftover;
                        }
                    }
                }
                Progress::Finished { leftover: remaining }
            }
            Action::Parallel { branches, finished } => {
                let mut leftover = dt;
                for (branch, done) in branches.iter_mut().zip(finished.iter_mut()) {
                    if *done {
                        continue;
                    }
                    if let Progress::Finished { leftover: rest } = branch.act(dt, target) {
                        *done = true;
                        leftover = leftover.min(rest);
                    }
                }

                if finished.iter().all(|done| *done) {
                    Progress::Finished { leftover }
                } else {
                    Progress::Running
                }
            }
            Action::Forever { body, running } => {
                let mut remaining = dt;
                loop {
                    match running.act(remaining, target) {
                        Progress::Running => return Progress::Running,
                        Progress::Finished { leftover } => {
                            **running = (**body).clone();
                            // A body with no duration would spin within a single frame
                            if leftover <= 0.0 || body.duration() <= 0.0 {
                                return Progress::Running;
                            }
                            remaining = leftover;
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    fn approx_color(a: [f32; 4], b: [f32; 4]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| approx(*x, *y))
    }

    #[test]
    fn test_alpha_tween_captures_start_value() {
        let mut target = Appearance {
            color: [1.0, 1.0, 1.0, 0.2],
            ..Default::default()
        };
        let mut fade = Action::fade_in(2.0);

        assert_eq!(fade.act(1.0, &mut target), Progress::Running);
        assert!(approx(target.color[3], 0.6));

        let progress = fade.act(1.5, &mut target);
        assert!(approx(target.color[3], 1.0));
        assert!(matches!(progress, Progress::Finished { leftover } if approx(leftover, 0.5)));
    }

    #[test]
    fn test_zero_duration_is_immediate() {
        let mut target = Appearance::default();
        let mut set = Action::alpha(0.0, 0.0);
        assert_eq!(
            set.act(0.25, &mut target),
            Progress::Finished { leftover: 0.25 }
        );
        assert_eq!(target.color[3], 0.0);
    }

    #[test]
    fn test_rotate_by_is_relative() {
        let mut target = Appearance {
            rotation: 10.0,
            ..Default::default()
        };
        let mut spin = Action::rotate_by(360.0, 1.0);

        spin.act(0.25, &mut target);
        assert!(approx(target.rotation, 100.0));

        // Someone else rotates the actor meanwhile; the delta still applies
        target.rotation += 5.0;
        let progress = spin.act(1.0, &mut target);
        assert!(approx(target.rotation, 375.0));
        assert!(progress.is_finished());
    }

    #[test]
    fn test_sequence_hands_over_leftover_time() {
        let mut target = Appearance {
            visible: false,
            ..Default::default()
        };
        let mut seq = Action::sequence(vec![
            Action::alpha(0.0, 0.0),
            Action::show(),
            Action::fade_in(2.0),
        ]);

        assert_eq!(seq.act(1.0, &mut target), Progress::Running);
        assert!(target.visible);
        assert!(approx(target.color[3], 0.5));

        let progress = seq.act(1.5, &mut target);
        assert!(approx(target.color[3], 1.0));
        assert!(matches!(progress, Progress::Finished { leftover } if approx(leftover, 0.5)));
    }

    #[test]
    fn test_parallel_runs_branches_side_by_side() {
        let mut target = Appearance::default();
        let mut vanish = Action::parallel(vec![
            Action::alpha(1.0, 0.0),
            Action::rotate_by(360.0, 1.0),
            Action::scale_to(0.0, 0.0, 2.0),
            Action::fade_out(1.0),
        ]);

        assert_eq!(vanish.act(0.5, &mut target), Progress::Running);
        assert!(approx(target.rotation, 180.0));
        assert!(approx(target.scale[0], 0.75));
        assert!(approx(target.color[3], 0.5));

        assert_eq!(vanish.act(0.5, &mut target), Progress::Running);
        assert!(approx(target.rotation, 360.0));
        assert!(approx(target.color[3], 0.0));

        assert!(vanish.act(1.0, &mut target).is_finished());
        assert_eq!(target.scale, [0.0, 0.0]);
        assert!(approx(target.rotation, 360.0));
    }

    #[test]
    fn test_forever_repeats_body() {
        let red = [1.0, 0.0, 0.0, 1.0];
        let blue = [0.0, 0.0, 1.0, 1.0];
        let mut target = Appearance::default();
        let mut pulse = Action::forever(Action::sequence(vec![
            Action::color(red, 1.0),
            Action::color(blue, 1.0),
        ]));

        assert_eq!(pulse.act(1.0, &mut target), Progress::Running);
        assert!(approx_color(target.color, red));

        pulse.act(0.5, &mut target);
        assert!(approx_color(target.color, [0.5, 0.0, 0.5, 1.0]));

        pulse.act(0.5, &mut target);
        assert!(approx_color(target.color, blue));

        // Second lap starts from blue again
        pulse.act(0.5, &mut target);
        assert!(approx_color(target.color, [0.5, 0.0, 0.5, 1.0]));

        // Leftover crosses a lap boundary within one frame
        pulse.act(2.0, &mut target);
        assert!(approx_color(target.color, [0.5, 0.0, 0.5, 1.0]));
    }

    #[test]
    fn test_forever_with_empty_body_does_not_spin() {
        let mut target = Appearance::default();
        let mut toggle = Action::forever(Action::sequence(vec![Action::hide()]));
        assert_eq!(toggle.act(1.0, &mut target), Progress::Running);
        assert!(!target.visible);
    }

    #[test]
    fn test_durations() {
        let seq = Action::sequence(vec![Action::fade_in(2.0), Action::rotate_by(90.0, 1.0)]);
        assert_eq!(seq.duration(), 3.0);
        let par = Action::parallel(vec![Action::fade_in(2.0), Action::scale_to(1.0, 1.0, 3.0)]);
        assert_eq!(par.duration(), 3.0);
        assert!(Action::forever(Action::show()).duration().is_infinite());
    }
}
