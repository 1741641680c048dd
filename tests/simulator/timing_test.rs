//! Tests for calibration and tick timing

use parking_guidance::{GuidanceMode, GuidanceSimulator, GuidanceState, SimulatorConfig};

use crate::test_utils::constants::*;
use crate::test_utils::{advance_ms, after_ticks_ms, drain};

fn reference_simulator() -> GuidanceSimulator {
    GuidanceSimulator::new(SimulatorConfig::default()).expect("default config is valid")
}

#[tokio::test(start_paused = true)]
async fn test_calibration_lasts_exactly_the_configured_delay() {
    let sim = reference_simulator();
    let rx = sim.subscribe();

    sim.start().expect("start from idle");
    assert_eq!(sim.state().mode, GuidanceMode::Calibrating);

    advance_ms(CALIBRATION_MS - 1).await;
    assert_eq!(sim.state().mode, GuidanceMode::Calibrating);

    advance_ms(2).await;
    let state = sim.state();
    assert_eq!(state.mode, GuidanceMode::Active);
    assert_eq!(state.remaining_distance, INITIAL_DISTANCE);

    let modes: Vec<GuidanceMode> = drain(&rx).iter().map(|s| s.mode).collect();
    assert_eq!(modes, vec![GuidanceMode::Calibrating, GuidanceMode::Active]);
}

#[tokio::test(start_paused = true)]
async fn test_one_step_per_tick_interval() {
    let sim = reference_simulator();
    sim.start().expect("start from idle");

    advance_ms(after_ticks_ms(1)).await;
    assert_eq!(sim.state().remaining_distance, 86);

    advance_ms(4 * TICK_MS).await;
    assert_eq!(sim.state().remaining_distance, 78);
}

#[tokio::test(start_paused = true)]
async fn test_reference_route_thresholds() {
    let sim = reference_simulator();
    let rx = sim.subscribe();
    sim.start().expect("start from idle");

    advance_ms(after_ticks_ms(TICKS_TO_ARRIVAL)).await;

    let events = drain(&rx);
    let first_at = |index: usize| {
        events
            .iter()
            .find(|s| s.current_step_index == index)
            .map(|s| s.remaining_distance)
    };
    assert_eq!(first_at(1), Some(44));
    assert_eq!(first_at(2), Some(22));
    assert_eq!(first_at(3), Some(14));
    assert_eq!(first_at(4), Some(4));

    let last = events.last().copied().expect("events published");
    assert_eq!(
        last,
        GuidanceState {
            mode: GuidanceMode::Arrived,
            remaining_distance: 0,
            current_step_index: 4,
        }
    );
    assert_eq!(
        events.iter().filter(|s| s.remaining_distance == 0).count(),
        1
    );
}

#[tokio::test(start_paused = true)]
async fn test_active_session_is_monotonic() {
    let sim = reference_simulator();
    let rx = sim.subscribe();
    sim.start().expect("start from idle");

    advance_ms(after_ticks_ms(TICKS_TO_ARRIVAL)).await;

    let events = drain(&rx);
    // Calibrating, Active, then one event per tick
    assert_eq!(events.len() as u64, 2 + TICKS_TO_ARRIVAL);

    let ticks: Vec<&GuidanceState> = events.iter().skip(1).collect();
    for pair in ticks.windows(2) {
        let (before, after) = (pair[0], pair[1]);
        assert!(after.remaining_distance <= before.remaining_distance);
        assert!(after.current_step_index >= before.current_step_index);
        assert!(after.current_step_index - before.current_step_index <= 1);
    }
}

#[tokio::test(start_paused = true)]
async fn test_ticking_stops_after_arrival() {
    let sim = reference_simulator();
    let rx = sim.subscribe();
    sim.start().expect("start from idle");

    advance_ms(after_ticks_ms(TICKS_TO_ARRIVAL)).await;
    assert_eq!(sim.state().mode, GuidanceMode::Arrived);
    drain(&rx);

    advance_ms(10 * TICK_MS).await;
    assert!(drain(&rx).is_empty());
    assert_eq!(sim.state().remaining_distance, 0);
}

#[tokio::test(start_paused = true)]
async fn test_zero_calibration_delay() {
    let config = SimulatorConfig {
        calibration_delay_ms: 0,
        ..SimulatorConfig::default()
    };
    let sim = GuidanceSimulator::new(config).expect("valid config");
    sim.start().expect("start from idle");
    assert_eq!(sim.state().mode, GuidanceMode::Calibrating);

    advance_ms(HALF_TICK_MS).await;
    assert_eq!(sim.state().mode, GuidanceMode::Active);
    assert_eq!(sim.state().remaining_distance, INITIAL_DISTANCE);

    advance_ms(TICK_MS).await;
    assert_eq!(sim.state().remaining_distance, INITIAL_DISTANCE - 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_runs_to_arrival_on_multi_thread_runtime() {
    let sim = GuidanceSimulator::new(crate::test_utils::fast_config()).expect("valid config");
    sim.start().expect("start from idle");

    let mut arrived = false;
    for _ in 0..400 {
        if sim.state().mode == GuidanceMode::Arrived {
            arrived = true;
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    assert!(arrived, "simulation should arrive within two seconds");
    assert_eq!(sim.state().current_step_index, 2);
}
