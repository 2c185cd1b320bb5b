#![warn(clippy::all, clippy::pedantic)]
use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use csv::Writer;
use flownet::{
    maximum_flow, shortest_paths, Distance, EdgeFlow, Error as GraphError, FlowAssignment, Graph,
    RawEdge, ShortestPaths,
};
use itertools::Itertools;
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

type Network = Graph<String, i64, i64>;

/// Shortest paths (Bellman-Ford) and maximum flow (Edmonds-Karp) over a weighted, capacitated
/// network read from a CSV edge list.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// CSV edge list with a `source,target,weight,capacity` header
    edges: PathBuf,

    /// Node the shortest paths and the flow start from
    #[arg(short, long)]
    source: String,

    /// Node the flow is routed to
    #[arg(short = 't', long)]
    sink: String,

    /// Write the positive edge flows to this CSV file
    #[arg(long, value_name = "CSV")]
    flows_out: Option<PathBuf>,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

// Function to read the edge list from a CSV file
fn read_edges_csv(filepath: &Path) -> Result<Network, Box<dyn Error>> {
    let mut rdr = csv::Reader::from_path(filepath)?;
    let rows: Vec<RawEdge<String, i64, i64>> = rdr.deserialize().collect::<Result<_, _>>()?;
    log::info!("read {} edges from {}", rows.len(), filepath.display());

    Graph::from_edges(rows).map_err(|e| format!("invalid edge list: {e}").into())
}

// Function to write the flow assignment
fn write_flows_csv(
    flows: &[EdgeFlow<String, i64>],
    filepath: &Path,
) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_path(filepath)?;
    for flow in flows {
        wtr.serialize(flow)?;
    }
    wtr.flush()?;
    Ok(())
}

fn report_shortest_paths(result: &Result<ShortestPaths<String, i64>, GraphError>, sink: &str) {
    let sp = match result {
        Ok(sp) => sp,
        Err(e) => {
            println!("=== Bellman-Ford: {e} ===");
            return;
        }
    };

    println!("=== Bellman-Ford shortest paths from {} ===", sp.source());
    for (node, distance, path) in sp.iter() {
        match (distance, path) {
            (Distance::Finite(d), Some(path)) => println!(
                "{} -> {node}: distance = {d}, path = {}",
                sp.source(),
                path.iter().join(" -> ")
            ),
            _ => println!("{} -> {node}: no path", sp.source()),
        }
    }

    let highlighted = sp
        .path_edges(&sink.to_string())
        .map(|(u, v)| format!("{u}->{v}"))
        .join(", ");
    if !highlighted.is_empty() {
        println!("shortest path edges to {sink}: {highlighted}");
    }
}

fn report_max_flow(network: &Network, mf: &FlowAssignment<String, i64>) {
    println!(
        "\n=== Edmonds-Karp maximum flow from {} to {}: {} ===",
        mf.source(),
        mf.sink(),
        mf.value()
    );
    for flow in mf.edge_flows() {
        println!("  {} -> {}: flow = {}", flow.source, flow.target, flow.flow);
    }
    println!("minimum cut: {}", describe_cut(network, mf));
}

fn describe_cut(network: &Network, mf: &FlowAssignment<String, i64>) -> String {
    let cut = mf
        .cut_edges(network)
        .map(|(_, e)| format!("{}->{} ({})", e.source(), e.target(), e.capacity()))
        .join(", ");
    if cut.is_empty() {
        "(none)".to_string()
    } else {
        cut
    }
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    TermLogger::init(
        log_level(cli.verbose),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let network = read_edges_csv(&cli.edges)?;

    report_shortest_paths(&shortest_paths(&network, &cli.source), &cli.sink);

    let mf = maximum_flow(&network, &cli.source, &cli.sink).map_err(|e| e.to_string())?;
    report_max_flow(&network, &mf);

    if let Some(path) = &cli.flows_out {
        write_flows_csv(mf.edge_flows(), path)?;
        log::info!("wrote {} edge flows to {}", mf.edge_flows().len(), path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network(edges: &[(&str, &str, i64, i64)]) -> Network {
        let mut network = Network::new();
        for &(u, v, w, c) in edges {
            network.add_edge(u.to_string(), v.to_string(), w, c).unwrap();
        }
        network
    }

    #[test]
    fn cut_lists_saturated_edges() {
        let network = network(&[("a", "b", 1, 2), ("b", "c", 1, 5)]);
        let mf = maximum_flow(&network, &"a".to_string(), &"c".to_string()).unwrap();

        assert_eq!(describe_cut(&network, &mf), "a->b (2)");
    }

    #[test]
    fn empty_cut_is_spelled_out() {
        let network = network(&[("a", "b", 1, 2), ("c", "d", 1, 5)]);
        let mf = maximum_flow(&network, &"a".to_string(), &"d".to_string()).unwrap();

        assert_eq!(mf.value(), 0);
        assert_eq!(describe_cut(&network, &mf), "(none)");
    }
}
