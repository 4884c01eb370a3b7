//! Throughput of the generation step and of organism clustering

use std::time::Instant;
use rand::SeedableRng;
use rand::rngs::StdRng;
use organism_life::{Grid, cluster};

fn random_grid(size: usize, density: f64) -> Grid {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    Grid::random(size, density, &mut rng)
}

/// Average milliseconds per call of `f` over `iterations` runs
fn time_ms(iterations: u32, mut f: impl FnMut()) -> f64 {
    let start = Instant::now();
    for _ in 0..iterations {
        f();
    }
    start.elapsed().as_secs_f64() * 1000.0 / iterations as f64
}

fn main() {
    println!("=== Organism Life Benchmark ===\n");

    let sizes = [32, 64, 128, 256, 512, 1024];
    let iterations = 20;

    println!("{:>10} {:>12} {:>12} {:>10} {:>12} {:>10}",
        "Size", "Serial", "Parallel", "Speedup", "Cluster", "Organisms");
    println!("{:-<72}", "");

    for size in sizes {
        let grid = random_grid(size, 0.3);
        let live = grid.live_cells();

        let serial_ms = time_ms(iterations, || { let _ = grid.next_generation(); });
        let parallel_ms = time_ms(iterations, || { let _ = grid.next_generation_parallel(); });
        let mut organisms = 0;
        let cluster_ms = time_ms(iterations, || organisms = cluster(&live, size).len());

        println!(
            "{:>10} {:>12.3} {:>12.3} {:>9.1}x {:>12.3} {:>10}",
            format!("{}x{}", size, size),
            serial_ms,
            parallel_ms,
            serial_ms / parallel_ms,
            cluster_ms,
            organisms
        );
    }

    println!("\n=== Clustering vs density (256x256) ===\n");
    for density in [0.05, 0.15, 0.3, 0.5] {
        let grid = random_grid(256, density);
        let live = grid.live_cells();
        let ms = time_ms(iterations, || { let _ = cluster(&live, 256); });
        println!("density {:.2}: {:>7} live cells, {:.3} ms, {:.1}M cells/sec",
            density, live.len(), ms, live.len() as f64 / (ms / 1000.0) / 1_000_000.0);
    }
}
