use std::time::Instant;

use crate::simulation::forces::ImpulseSet;
use crate::simulation::integrator::step;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec2, System};

/// Helper to build a manual System of size `n`
/// Bodies are spread far apart so nothing merges while timing
fn make_system(n: usize, params: &Parameters) -> System {
    let bodies = (0..n).map(|i| {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let x = NVec2::new(
            (i_f * 0.37).sin() * 4000.0 + i_f * 60.0,
            (i_f * 0.13).cos() * 4000.0,
        );
        Body::new(x, NVec2::zeros(), 1.0e22, params)
    });
    System::from_bodies(bodies.filter_map(Result::ok))
}

/// Time one all-pairs frame for growing `n`
/// Paste output directly into a spreadsheet to graph
pub fn bench_step() {
    let params = Parameters::default();
    let forces = ImpulseSet::gravity();

    println!("N,step_ms");

    for n in [50, 100, 200, 400, 800, 1600] {
        // Small n: average over more steps to smooth noise
        let steps = if n <= 400 { 20 } else { 3 };
        let mut sys = make_system(n, &params);

        // Warm up
        step(&mut sys, &forces, &params);

        let t0 = Instant::now();
        for _ in 0..steps {
            step(&mut sys, &forces, &params);
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6}", n, ms);
    }
}
