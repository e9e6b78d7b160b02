use lazy_pairwise::bench_args::*;
use lazy_pairwise::cache::*;
use lazy_pairwise::collection::*;
use lazy_pairwise::distances::*;
use lazy_pairwise::error::*;
use lazy_pairwise::extract::*;
use lazy_pairwise::pairwise::*;
use lazy_pairwise::util::*;
use std::time::Instant;

/// Read every pair `passes` times, returning a checksum.
fn time_reads<G>(
    label: &str,
    pairs: &[(Coord<2>, Coord<2>)],
    passes: usize,
    read: G,
) -> Result<f64>
where
    G: Fn(&Coord<2>, &Coord<2>) -> Result<f64>,
{
    profiling::scope!("time_reads", label);
    let start = Instant::now();
    let mut checksum = 0.0;
    for _ in 0..passes {
        for (p, q) in pairs {
            checksum += read(p, q)?;
        }
    }
    let elapsed = start.elapsed();
    println!(
        "{}: {} reads in {:?} ({:.1} ns / read), checksum {}",
        label,
        pairs.len() * passes,
        elapsed,
        elapsed.as_nanos() as f64 / (pairs.len() * passes).max(1) as f64,
        checksum
    );
    Ok(checksum)
}

fn main() -> Result<()> {
    let args = Args::cli_setup("pairwise_bench");

    let grid = args.random_grid();
    let side = PatchSide::patch(args.patch_radius())?;
    let domain = side.interior(&grid);
    let pairs = args.read_pairs(&domain);
    println!(
        "grid {}, interior {}, {} pairs, pattern {:?}",
        grid.aabb(),
        domain,
        pairs.len(),
        args.read_pattern
    );

    let lazy_distance = Counted::new(patch_sq_euclidean::<2>);
    let lazy = PairwiseArray::new(
        domain,
        domain,
        CollectionPair::shared(&grid),
        Pipeline::symmetric(side),
        &lazy_distance,
        &NullCache,
    )?;
    let expected = time_reads("uncached", &pairs, args.passes, |p, q| lazy.read(p, q))?;
    println!("  distance calls: {}", lazy_distance.calls());
    lazy.print_report();

    let window = LocalWindow::new(args.window_size())?;
    let cached_distance = Counted::new(patch_sq_euclidean::<2>);
    let cached = PairwiseArray::new(
        domain,
        domain,
        CollectionPair::shared(&grid),
        Pipeline::symmetric(side),
        &cached_distance,
        &window,
    )?;
    let checksum = time_reads("local window", &pairs, args.passes, |p, q| cached.read(p, q))?;
    println!("  distance calls: {}", cached_distance.calls());
    println!("  matches uncached: {}", checksum == expected);
    cached.print_report();

    if !args.no_precompute {
        let precompute_distance = Counted::new(patch_sq_euclidean::<2>);
        let start = Instant::now();
        let precomputed = PairwiseArray::new(
            domain,
            domain,
            CollectionPair::shared(&grid),
            Pipeline::symmetric(side),
            &precompute_distance,
            &window,
        )?
        .precompute();
        println!("precompute: {:?}", start.elapsed());
        let checksum =
            time_reads("precomputed", &pairs, args.passes, |p, q| precomputed.read(p, q))?;
        println!("  distance calls: {}", precompute_distance.calls());
        println!("  matches uncached: {}", checksum == expected);
        precomputed.print_report();
    }

    args.finish();
    Ok(())
}
