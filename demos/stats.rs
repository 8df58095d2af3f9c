use clap::Parser;

use linarr_rs::crossings::{num_crossings, CrossingsAlgorithm};
use linarr_rs::linarr::{is_planar, is_projective, mean_dependency_distance, sum_edge_lengths};
use linarr_rs::moments;
use linarr_rs::properties;
use linarr_rs::tree::{FreeTree, RootedTree};

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Number of vertices.
    #[arg(value_name = "INT", default_value = "12")]
    n: usize,

    /// Tree family: `path`, `star`, `caterpillar`, `binary`, or `spider`.
    #[clap(long, value_name = "NAME", default_value = "binary")]
    family: String,

    /// Root vertex for the rooted statistics.
    #[clap(long, value_name = "INT", default_value = "0")]
    root: usize,
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

    let tree = build_tree(&args.family, args.n)?;
    println!(
        "tree = {} on {} vertices with {} edges",
        args.family,
        tree.num_nodes(),
        tree.num_edges()
    );

    // Shape of the tree itself, no arrangement involved.
    let (c1, c2) = properties::centroid(&tree);
    match c2 {
        Some(c2) => println!("centroid = {{{}, {}}}", c1, c2),
        None => println!("centroid = {{{}}}", c1),
    }
    println!("<k^2> = {}", properties::moment_degree(&tree, 2));
    println!("<k^3> = {}", properties::moment_degree(&tree, 3));
    println!(
        "pairs of independent edges = {}",
        properties::num_pairs_independent_edges(&tree)
    );

    // Metrics of the identity arrangement (vertex v at position v).
    let d = sum_edge_lengths(&tree, None)?;
    let c = num_crossings(&tree, None, CrossingsAlgorithm::default())?;
    println!("identity: D = {}, C = {}", d, c);
    println!("identity: MDD = {}", mean_dependency_distance(&tree, None)?);
    println!("identity: planar = {}", is_planar(&tree, None)?);

    // Moments over uniformly random arrangements, exact and as floats.
    println!(
        "E[C] = {} ~ {:.6}",
        moments::expected_crossings(&tree),
        moments::expected_crossings_f64(&tree)
    );
    println!(
        "V[C] = {} ~ {:.6}",
        moments::variance_crossings(&tree)?,
        moments::variance_crossings_f64(&tree)?
    );
    println!(
        "E[D] = {} ~ {:.6}",
        moments::expected_sum_edge_lengths(&tree),
        moments::expected_sum_edge_lengths_f64(&tree)
    );
    println!(
        "V[D] = {} ~ {:.6}",
        moments::variance_sum_edge_lengths(&tree),
        moments::variance_sum_edge_lengths_f64(&tree)
    );
    println!(
        "E[D | planar] = {} ~ {:.6}",
        moments::expected_sum_edge_lengths_planar(&tree),
        moments::expected_sum_edge_lengths_planar_f64(&tree)
    );

    // Statistics that need a root.
    let mut rooted = RootedTree::new(tree.clone(), args.root)?;
    rooted.compute_subtree_sizes();
    println!("rooted at {}: projective = {}", args.root, is_projective(&rooted, None)?);
    println!(
        "rooted at {}: E[D | projective] = {} ~ {:.6}",
        args.root,
        moments::expected_sum_edge_lengths_projective(&rooted)?,
        moments::expected_sum_edge_lengths_projective_f64(&rooted)?
    );
    println!(
        "rooted at {}: sum of hierarchical distances = {}",
        args.root,
        properties::sum_hierarchical_distance(&rooted)
    );
    println!(
        "rooted at {}: mean hierarchical distance = {}",
        args.root,
        properties::mean_hierarchical_distance(&rooted)?
    );

    // for v in 0..tree.num_nodes() {
    //     println!("degree[{}] = {}", v, tree.degree(v));
    // }

    let time_total = time_total.elapsed();
    println!("Done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
