use clap::Parser;

use linarr_rs::dmin::{
    min_sum_edge_lengths, min_sum_edge_lengths_planar, min_sum_edge_lengths_projective,
    PlanarAlgorithm, ProjectiveAlgorithm, UnconstrainedAlgorithm,
};
use linarr_rs::tree::{FreeTree, RootedTree};

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Number of vertices.
    #[arg(value_name = "INT", default_value = "15")]
    n: usize,

    /// Tree family: `path`, `star`, `caterpillar`, `binary`, or `spider`.
    #[clap(long, value_name = "NAME", default_value = "caterpillar")]
    family: String,

    /// Root vertex for the projective solvers.
    #[clap(long, value_name = "INT", default_value = "0")]
    root: usize,

    /// Print the optimal arrangements, not only their costs.
    #[clap(long)]
    arrangements: bool,
}

fn build_tree(family: &str, n: usize) -> color_eyre::Result<FreeTree> {
    let edges: Vec<(usize, usize)> = match family {
        "path" => (1..n).map(|v| (v - 1, v)).collect(),
        "star" => (1..n).map(|v| (0, v)).collect(),
        "caterpillar" => {
            // A spine of ceil(n/2) vertices with a leaf below each spine vertex.
            let spine = n.div_ceil(2);
            let mut edges: Vec<(usize, usize)> = (1..spine).map(|v| (v - 1, v)).collect();
            for leaf in spine..n {
                edges.push((leaf - spine, leaf));
            }
            edges
        }
        "binary" => (1..n).map(|v| ((v - 1) / 2, v)).collect(),
        "spider" => {
            // Three legs of as equal length as possible, joined at vertex 0.
            let mut ends = [0usize; 3];
            (1..n)
                .map(|v| {
                    let leg = (v - 1) % 3;
                    let e = (ends[leg], v);
                    ends[leg] = v;
                    e
                })
                .collect()
        }
        other => color_eyre::eyre::bail!("unknown tree family: {}", other),
    };
    Ok(FreeTree::from_edges(n, &edges)?)
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let args = Cli::parse();
    println!("args = {:?}", args);

    // Note:
    // - Every solver is exact, so within one constraint level all algorithms
    //   must report the same cost.
    // - Across levels the minima can only grow:
    //   unconstrained <= planar <= projective (for any choice of root).
    // - A path reaches D = n - 1 at every level; every other family exceeds it.

    let tree = build_tree(&args.family, args.n)?;
    println!(
        "tree = {} on {} vertices with {} edges",
        args.family,
        tree.num_nodes(),
        tree.num_edges()
    );

    println!("Unconstrained minimum:");
    for algorithm in [UnconstrainedAlgorithm::Shiloach, UnconstrainedAlgorithm::Chung] {
        let time = std::time::Instant::now();
        let result = min_sum_edge_lengths(&tree, algorithm)?;
        println!(
            "  {:?}: D = {} in {:.3} s",
            algorithm,
            result.cost,
            time.elapsed().as_secs_f64()
        );
        if args.arrangements {
            println!("    arrangement = {}", result.arrangement);
        }
    }

    println!("Planar minimum:");
    for algorithm in [PlanarAlgorithm::AlemanyEstebanFerrer, PlanarAlgorithm::HochbergStallmann] {
        let time = std::time::Instant::now();
        let result = min_sum_edge_lengths_planar(&tree, algorithm)?;
        println!(
            "  {:?}: D = {} in {:.3} s",
            algorithm,
            result.cost,
            time.elapsed().as_secs_f64()
        );
        if args.arrangements {
            println!("    arrangement = {}", result.arrangement);
        }
    }

    println!("Projective minimum rooted at {}:", args.root);
    let mut rooted = RootedTree::new(tree.clone(), args.root)?;
    rooted.compute_subtree_sizes();
    for algorithm in [
        ProjectiveAlgorithm::AlemanyEstebanFerrer,
        ProjectiveAlgorithm::HochbergStallmann,
    ] {
        let time = std::time::Instant::now();
        let result = min_sum_edge_lengths_projective(&rooted, algorithm)?;
        println!(
            "  {:?}: D = {} in {:.3} s",
            algorithm,
            result.cost,
            time.elapsed().as_secs_f64()
        );
        if args.arrangements {
            println!("    arrangement = {}", result.arrangement);
        }
    }

    let time_total = time_total.elapsed();
    println!("Done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
