use super::{AnimationTiming, STEPS};

/// Values shown while the score counts up from zero to `target`.
///
/// The counter advances in `STEPS` equal increments and always lands on
/// `target`. A zero score is shown once.
pub fn counter_values(target: u32) -> Vec<u32> {
    if target == 0 {
        return vec![0];
    }
    (1..=STEPS)
        .map(|i| (target as f64 * i as f64 / STEPS as f64).round() as u32)
        .collect()
}

/// Count up to `target`, handing each displayed value to `on_tick`.
///
/// Ticks are spaced by the animation's `step_delay`.
pub async fn run_counter<F>(target: u32, timing: AnimationTiming, mut on_tick: F)
where
    F: FnMut(u32),
{
    let values = counter_values(target);
    let last = values.len().saturating_sub(1);
    for (i, value) in values.into_iter().enumerate() {
        on_tick(value);
        if i < last && !timing.step_delay.is_zero() {
            tokio::time::sleep(timing.step_delay).await;
        }
    }
}
