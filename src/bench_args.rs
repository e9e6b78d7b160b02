use crate::build_info;
use crate::collection::*;
use crate::util::*;
use clap::{Parser, ValueEnum};
use rand::prelude::*;

#[cfg(feature = "profile-with-puffin")]
use std::sync::Mutex;

#[cfg(feature = "profile-with-puffin")]
static PUFFIN_SERVER: Mutex<Option<puffin_http::Server>> = Mutex::new(None);

/// Order in which the bench visits index pairs.
#[derive(Copy, Clone, Debug, ValueEnum, Default, PartialEq, Eq)]
pub enum ReadPattern {
    /// Every pair whose offset lies in the window, row-major in p
    #[default]
    Sweep,

    /// Uniformly random pairs over the whole domain
    Random,

    /// Random p, with q inside p's window
    Neighborhood,
}

/// Patch distance read benchmark, lazy vs cached vs precomputed
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Grid size, assume square
    #[arg(short, long, default_value = "64")]
    pub grid_size: usize,

    /// Radius of the patch extracted around each index.
    #[arg(short, long, default_value = "2")]
    pub patch_radius: i32,

    /// Local window size, per dimension.
    #[arg(short, long, default_value = "7")]
    pub window_size: i32,

    /// Which index pairs to read.
    #[arg(short, long, default_value = "sweep")]
    pub read_pattern: ReadPattern,

    /// How many pairs to draw for the random patterns.
    #[arg(short, long, default_value = "100000")]
    pub samples: usize,

    /// How many times to repeat the read pattern.
    #[arg(long, default_value = "2")]
    pub passes: usize,

    /// Seed for the grid values and random read patterns.
    #[arg(long, default_value = "1")]
    pub seed: u64,

    /// Skip the precomputed run
    #[arg(long)]
    pub no_precompute: bool,

    /// Print build information and quit
    #[arg(long)]
    pub build_info: bool,
}

impl Args {
    pub fn cli_setup(name: &str) -> Self {
        let args = Args::parse();

        if args.build_info {
            build_info::print_report(name);
            std::process::exit(0);
        }

        #[cfg(feature = "profile-with-puffin")]
        {
            println!("Initializing profiling server:");
            let server_addr = format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT);
            match puffin_http::Server::new(&server_addr) {
                Ok(server) => {
                    println!("Run this to view profiling data:  puffin_viewer {server_addr}");
                    std::thread::sleep(std::time::Duration::from_secs(2));
                    profiling::puffin::set_scopes_on(true);
                    profiling::finish_frame!();
                    if let Ok(mut slot) = PUFFIN_SERVER.lock() {
                        *slot = Some(server);
                    }
                }
                Err(e) => println!("WARNING: profiling server failed to start, {e}"),
            }
        }

        args
    }

    pub fn grid_bounds(&self) -> AABB<2> {
        let inclusive = self.grid_size as i32 - 1;
        AABB::new(matrix![0, inclusive; 0, inclusive])
    }

    pub fn window_size(&self) -> [i32; 2] {
        [self.window_size; 2]
    }

    pub fn patch_radius(&self) -> [i32; 2] {
        [self.patch_radius; 2]
    }

    /// Seeded uniform values in `[0, 1)`.
    pub fn random_grid(&self) -> OwnedCollection<2, f64> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        OwnedCollection::from_fn(self.grid_bounds(), |_| rng.gen::<f64>())
    }

    /// Pairs to read, drawn from `domain` on both sides.
    pub fn read_pairs(&self, domain: &AABB<2>) -> Vec<(Coord<2>, Coord<2>)> {
        if domain.is_empty() {
            return Vec::new();
        }
        let window = AABB::centered(&Coord::from(self.window_size().map(|w| w / 2)));
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(1));
        let mut random_coord = |aabb: &AABB<2>| -> Coord<2> {
            Coord::from_fn(|d, _| rng.gen_range(aabb.min()[d]..=aabb.max()[d]))
        };

        match self.read_pattern {
            ReadPattern::Sweep => domain
                .coord_iter()
                .flat_map(|p| {
                    window
                        .coord_iter()
                        .map(move |offset| (p, p + offset))
                        .filter(|(_, q)| domain.contains(q))
                        .collect::<Vec<_>>()
                })
                .collect(),
            ReadPattern::Random => (0..self.samples)
                .map(|_| (random_coord(domain), random_coord(domain)))
                .collect(),
            ReadPattern::Neighborhood => {
                let mut result = Vec::with_capacity(self.samples);
                while result.len() < self.samples {
                    let p = random_coord(domain);
                    let q = p + random_coord(&window);
                    if domain.contains(&q) {
                        result.push((p, q));
                    }
                }
                result
            }
        }
    }

    pub fn finish(&self) {
        #[cfg(feature = "profile-with-puffin")]
        {
            println!("Flushing profiler");
            if let Ok(mut slot) = PUFFIN_SERVER.lock() {
                slot.take();
            }
        }
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    fn args(pattern: ReadPattern) -> Args {
        Args::parse_from([
            "pairwise_bench",
            "--grid-size",
            "10",
            "--window-size",
            "3",
            "--samples",
            "50",
            "--read-pattern",
            pattern.to_possible_value().unwrap().get_name(),
        ])
    }

    #[test]
    fn parse_test() {
        let a = args(ReadPattern::Random);
        assert_eq!(a.grid_bounds(), AABB::new(matrix![0, 9; 0, 9]));
        assert_eq!(a.read_pattern, ReadPattern::Random);
        assert_eq!(a.patch_radius(), [2, 2]);
        assert_eq!(a.passes, 2);
        assert!(!a.build_info);
    }

    #[test]
    fn grid_is_seeded_test() {
        let a = args(ReadPattern::Sweep);
        assert_eq!(a.random_grid().buffer(), a.random_grid().buffer());
        assert!(a.random_grid().buffer().iter().all(|v| (0.0..1.0).contains(v)));
    }

    #[test]
    fn read_pairs_test() {
        let domain = AABB::new(matrix![2, 7; 2, 7]);
        let window = AABB::centered(&vector![1, 1]);

        let sweep = args(ReadPattern::Sweep).read_pairs(&domain);
        // 36 positions, 9 offsets each, minus the ones leaving the domain
        assert_eq!(sweep.len(), 6 * 6 * 9 - 4 * 6 * 3 + 4);
        assert_eq!(sweep[0], (vector![2, 2], vector![2, 2]));

        for pattern in [ReadPattern::Random, ReadPattern::Neighborhood] {
            let pairs = args(pattern).read_pairs(&domain);
            assert_eq!(pairs.len(), 50);
            assert!(pairs
                .iter()
                .all(|(p, q)| domain.contains(p) && domain.contains(q)));
            if pattern == ReadPattern::Neighborhood {
                assert!(pairs.iter().all(|(p, q)| window.contains(&(q - p))));
            }
        }
    }
}
