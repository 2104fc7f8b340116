use std::time::Duration;

use model_showcase::config::{ConfettiConfig, ViewerConfig};
use model_showcase::core::{SurfaceTarget, WindowDimensions};
use model_showcase::effects::{BurstSequencer, ConfettiEffect, ConfettiSystem, Origin};
use model_showcase::{Variant, ViewerCommand, ViewerContext};

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[cfg(test)]
mod confetti_tests {
    use super::*;

    #[test]
    fn test_full_schedule_fires_each_emission_once() {
        let mut seq = BurstSequencer::new(&ConfettiConfig::default());
        let mut fired = Vec::new();

        // Step through 6 seconds at roughly 60 Hz
        for t in (0..=6000).step_by(16) {
            fired.extend(seq.advance(ms(t)));
        }

        let scripted: Vec<(Duration, u32)> = fired
            .iter()
            .filter(|e| matches!(e.origin, Origin::Point { .. }))
            .map(|e| (e.at, e.particle_count))
            .collect();
        assert_eq!(
            scripted,
            vec![(ms(1000), 100), (ms(1300), 50), (ms(1600), 50), (ms(3000), 150)]
        );

        let repeats: Vec<_> = fired
            .iter()
            .filter(|e| matches!(e.origin, Origin::Band { .. }))
            .collect();
        // Left and right band for each of the seven non-empty repeats
        assert_eq!(repeats.len(), 14);
        assert!(seq.is_finished());
    }

    #[test]
    fn test_emissions_in_time_order() {
        let mut seq = BurstSequencer::new(&ConfettiConfig::default());
        let fired = seq.advance(ms(10_000));
        assert!(fired.windows(2).all(|w| w[0].at <= w[1].at));
        assert!(seq.is_finished());
    }

    #[test]
    fn test_repeat_counts_strictly_decrease() {
        let seq = BurstSequencer::new(&ConfettiConfig::default());
        let counts: Vec<u32> = (1..).map_while(|k| seq.repeat_count(k)).collect();
        assert!(!counts.is_empty());
        assert!(counts.windows(2).all(|w| w[0] > w[1]));
        assert!(counts.iter().all(|&c| c <= 50));
    }

    #[test]
    fn test_not_retriggerable() {
        let mut seq = BurstSequencer::new(&ConfettiConfig::default());
        assert!(!seq.advance(ms(10_000)).is_empty());
        assert!(seq.advance(ms(10_000)).is_empty());
        assert!(seq.advance(ms(20_000)).is_empty());
    }

    #[test]
    fn test_custom_start_delay_shifts_schedule() {
        let config = ConfettiConfig {
            start_delay_ms: 0,
            ..ConfettiConfig::default()
        };
        let mut seq = BurstSequencer::new(&config);
        let first = seq.advance(Duration::ZERO);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].particle_count, 100);
    }

    #[test]
    fn test_effect_settles_after_schedule() {
        let mut effect = ConfettiEffect::new(
            BurstSequencer::new(&ConfettiConfig::default()),
            ConfettiSystem::seeded(42),
        );

        effect.advance(ms(1000), [800.0, 600.0]);
        assert_eq!(effect.particles().len(), 100);
        assert!(!effect.is_done());

        let mut t = 1000;
        while !effect.is_done() && t < 60_000 {
            t += 16;
            effect.advance(ms(t), [800.0, 600.0]);
        }
        assert!(effect.is_done());
        assert!(effect.particles().is_empty());
    }
}

struct FixedSurface(WindowDimensions);

impl SurfaceTarget for FixedSurface {
    fn resize(&mut self, dimensions: WindowDimensions) {
        self.0 = dimensions;
    }

    fn surface_size(&self) -> WindowDimensions {
        self.0
    }
}

#[cfg(test)]
mod viewer_confetti_tests {
    use super::*;

    fn launch() -> ViewerContext {
        ViewerContext::bootstrap(
            Variant::Launch,
            ViewerConfig::default(),
            Some(WindowDimensions::new(800, 600)),
        )
        .unwrap()
    }

    fn steps(ctx: &ViewerContext) -> u64 {
        ctx.confetti.as_ref().map_or(0, ConfettiEffect::steps)
    }

    #[test]
    fn test_one_particle_step_per_frame_regardless_of_input() {
        let mut ctx = launch();
        let mut surface = FixedSurface(WindowDimensions::new(800, 600));
        let now = chrono::Local::now().naive_local();

        let frames = 30;
        for n in 0..frames {
            ctx.advance_confetti(ms(1000 + n * 16));

            // Input and timer wakes between two frames
            ctx.dispatch(ViewerCommand::BeginDrag, &mut surface);
            for _ in 0..5 {
                ctx.dispatch(ViewerCommand::Orbit { dx: 3.0, dy: 1.0 }, &mut surface);
                ctx.dispatch(ViewerCommand::Zoom(1.0), &mut surface);
                ctx.advance_effects(0.001, now);
            }
            ctx.dispatch(ViewerCommand::EndDrag, &mut surface);
            ctx.dispatch(
                ViewerCommand::Resize {
                    dimensions: WindowDimensions::new(800 + n as u32, 600),
                    scale_factor: 1.0,
                },
                &mut surface,
            );
        }

        assert_eq!(steps(&ctx), frames);
    }

    #[test]
    fn test_timer_wakes_do_not_step_confetti() {
        let mut ctx = launch();
        ctx.advance_confetti(ms(1000));
        let particles = ctx.confetti.as_ref().map_or(0, |c| c.particles().len());

        let now = chrono::Local::now().naive_local();
        for _ in 0..500 {
            ctx.advance_effects(0.016, now);
        }

        let confetti = ctx.confetti.as_ref().unwrap();
        assert_eq!(confetti.steps(), 1);
        assert_eq!(confetti.particles().len(), particles);
    }
}
