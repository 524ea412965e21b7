//! Simulation statistics collection and reporting.
//!
//! This module tracks what the control unit did over a run. It provides:
//! 1. **Cycles:** total, reset, enabled and gated (`ENABLE` low) cycles.
//! 2. **Strobes:** rising edges, commits, re-strobes without a new selector,
//!    and edges lost while the unit was gated.
//! 3. **Output:** cycles spent disconnected and connected.

use std::time::Instant;

use serde::Serialize;

/// Statistics gathered by the control unit, one counter per event class.
#[derive(Debug, Clone, Serialize)]
pub struct SimStats {
    #[serde(skip)]
    start_time: Instant,
    /// Total clock edges seen.
    pub cycles: u64,
    /// Cycles spent with reset applied.
    pub reset_cycles: u64,
    /// Active cycles with `ENABLE` high.
    pub enabled_cycles: u64,
    /// Active cycles with `ENABLE` low (outputs held).
    pub gated_cycles: u64,
    /// Strobe rising edges acted on.
    pub strobe_edges: u64,
    /// Edges that latched a new selector (`SEL_EN` high).
    pub commits: u64,
    /// Edges without `SEL_EN`: disconnect window only.
    pub restrobes: u64,
    /// Edges that arrived while `ENABLE` was low.
    pub lost_edges: u64,
    /// Enabled cycles with READY forced low by the disconnect window.
    pub disconnected_cycles: u64,
    /// Enabled cycles with READY high.
    pub connected_cycles: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            reset_cycles: 0,
            enabled_cycles: 0,
            gated_cycles: 0,
            strobe_edges: 0,
            commits: 0,
            restrobes: 0,
            lost_edges: 0,
            disconnected_cycles: 0,
            connected_cycles: 0,
        }
    }
}

impl SimStats {
    /// Host time since the statistics were created.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    /// Fraction of enabled cycles with READY high, in percent.
    pub fn connected_ratio(&self) -> f64 {
        if self.enabled_cycles == 0 {
            0.0
        } else {
            (self.connected_cycles as f64 / self.enabled_cycles as f64) * 100.0
        }
    }

    /// Prints a summary to stdout.
    pub fn print(&self) {
        let cyc = self.cycles.max(1) as f64;
        let pct = |n: u64| (n as f64 / cyc) * 100.0;

        println!("\n==========================================================");
        println!("SELECTOR CONTROL UNIT STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {:.4} s", self.elapsed_secs());
        println!("sim_cycles               {}", self.cycles);
        println!("----------------------------------------------------------");
        println!("CYCLE BREAKDOWN");
        println!(
            "  cycles.reset           {} ({:.2}%)",
            self.reset_cycles,
            pct(self.reset_cycles)
        );
        println!(
            "  cycles.enabled         {} ({:.2}%)",
            self.enabled_cycles,
            pct(self.enabled_cycles)
        );
        println!(
            "  cycles.gated           {} ({:.2}%)",
            self.gated_cycles,
            pct(self.gated_cycles)
        );
        println!("----------------------------------------------------------");
        println!("STROBE");
        println!("  strobe.edges           {}", self.strobe_edges);
        println!("  strobe.commits         {}", self.commits);
        println!("  strobe.restrobes       {}", self.restrobes);
        println!("  strobe.lost            {}", self.lost_edges);
        println!("----------------------------------------------------------");
        println!("OUTPUT");
        println!("  ready.disconnected     {}", self.disconnected_cycles);
        println!("  ready.connected        {}", self.connected_cycles);
        println!("  ready.ratio            {:.2}%", self.connected_ratio());
        println!("==========================================================");
    }
}
