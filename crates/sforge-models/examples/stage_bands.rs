//! Demo: Progress-to-Stage Band Tables
//!
//! Run with: cargo run -p sforge-models --example stage_bands

use sforge_models::{stage_for, JobKind};

fn main() {
    for kind in [JobKind::FullWorkflow, JobKind::QuickWorkflow] {
        println!("\n{}", "=".repeat(60));
        println!("WORKFLOW: {}", kind);
        println!("{}", "=".repeat(60));

        let mut current = "";
        for progress in 0..=100u8 {
            let stage = stage_for(kind, progress);
            if stage != current {
                println!("{:>4}%  {}", progress, stage);
                current = stage;
            }
        }
    }
}
