use super::*;

#[test]
fn detached_flag_starts_alive() {
    assert!(Alive::detached().is_alive());
}

#[test]
fn kill_is_seen_through_every_clone() {
    let alive = Alive::detached();
    let task_copy = alive.clone();
    alive.kill();
    assert!(!task_copy.is_alive());
}
