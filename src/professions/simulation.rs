//! The pure simulation step: advance one profession by one time quantum.
//!
//! Everything here is plain data-in data-out so the progression rules can
//! be exercised without an app, a clock, or a window. The plugin in
//! `mod.rs` owns the accumulator that turns wall-clock time into quanta.

use crate::shared::*;

/// Experience needed to go from `level` to `level + 1`.
/// Strictly increasing; defined for level >= 1.
pub fn xp_required_for_level(level: u32) -> u64 {
    (100.0 * 1.25_f64.powi(level as i32 - 1)).floor() as u64
}

/// Loot produced by one profession during one quantum.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskYield {
    pub resource_id: String,
    pub quantity: u64,
}

/// Advance a profession by `delta_ms` milliseconds.
///
/// A paused profession is left untouched (progress is retained so the task
/// resumes where it stopped). An assignment pointing at a task that no
/// longer exists, or that now requires a higher level than the profession
/// has, is cleared instead of advanced.
///
/// Completions are counted exactly: a quantum long enough for several
/// completions awards all of them, and each experience award cascades
/// through as many level-ups as it covers. `current_xp < xp_to_next_level`
/// holds when this returns.
pub fn advance_profession(prof: &mut ProfessionState, delta_ms: u64) -> Option<TaskYield> {
    let index = prof.active_task_index?;
    if prof.is_paused {
        return None;
    }

    let task = match prof.tasks.get(index) {
        Some(task) if prof.level >= task.required_level => task.clone(),
        _ => {
            clear_assignment(prof);
            return None;
        }
    };

    let progress = prof.task_progress + delta_ms;
    let duration = task.time_to_complete.max(1);
    let completions = progress / duration;
    prof.task_progress = progress % duration;

    if completions == 0 {
        return None;
    }

    for _ in 0..completions {
        award_experience(prof, task.experience);
    }

    let quantity = task.resource_quantity * completions;
    (quantity > 0).then(|| TaskYield {
        resource_id: task.resource_id,
        quantity,
    })
}

/// One experience award, converting any overflow into levels immediately.
fn award_experience(prof: &mut ProfessionState, experience: u64) {
    prof.current_xp += experience;
    while prof.current_xp >= prof.xp_to_next_level {
        prof.current_xp -= prof.xp_to_next_level;
        prof.level += 1;
        prof.xp_to_next_level = xp_required_for_level(prof.level);
    }
}

fn clear_assignment(prof: &mut ProfessionState) {
    prof.active_task_index = None;
    prof.is_paused = false;
    prof.task_progress = 0;
}
