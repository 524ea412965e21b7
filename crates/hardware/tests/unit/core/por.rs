//! # Power-On-Reset Tests
//!
//! The detector reads `XX` for two edges, `1X` until reset is seen with the
//! unit disabled, then `11` forever.

use selsim_core::common::Bits;
use selsim_core::core::PorState;
use selsim_core::core::por::PowerOnReset;

#[test]
fn test_encodings() {
    assert_eq!(PorState::Unknown.bits().to_string(), "XX");
    assert_eq!(PorState::Settling.bits().to_string(), "1X");
    assert_eq!(PorState::Settled.bits().to_string(), "11");
}

#[test]
fn test_from_bits() {
    assert_eq!(PorState::from_bits("1X".parse().unwrap()), Some(PorState::Settling));
    assert_eq!(PorState::from_bits(Bits::known(2, 0b11)), Some(PorState::Settled));
    assert_eq!(PorState::from_bits(Bits::known(2, 0b01)), None);
    assert_eq!(PorState::from_bits("X1".parse().unwrap()), None);
}

#[test]
fn test_settles_after_two_edges_and_reset() {
    let mut por = PowerOnReset::new();
    assert_eq!(por.state(), PorState::Unknown);
    assert_eq!(por.clock(false, false), PorState::Unknown);
    assert_eq!(por.clock(false, false), PorState::Settling);
    assert_eq!(por.clock(false, false), PorState::Settled);
    assert!(por.is_settled());
}

#[test]
fn test_waits_for_reset_with_ena_low() {
    let mut por = PowerOnReset::new();
    let _ = por.clock(true, true);
    let _ = por.clock(true, true);
    assert_eq!(por.clock(true, false), PorState::Settling);
    assert_eq!(por.clock(false, true), PorState::Settling);
    assert_eq!(por.clock(false, false), PorState::Settled);
}

#[test]
fn test_never_regresses() {
    let mut por = PowerOnReset::new();
    for _ in 0..3 {
        let _ = por.clock(false, false);
    }
    for (ena, rst_n) in [(true, true), (true, false), (false, true), (false, false)] {
        assert_eq!(por.clock(ena, rst_n), PorState::Settled);
    }
}

#[test]
fn test_ordering_follows_progress() {
    assert!(PorState::Unknown < PorState::Settling);
    assert!(PorState::Settling < PorState::Settled);
}
