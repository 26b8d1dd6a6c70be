use nodegrid::NodeCollection;
use plotters::prelude::*;
use rand::Rng;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Lets 400 nodes drift for a few steps, deleting some on the way, and draws the
/// final neighbor pairs together with the grown domain of the spatial index.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let filename = "2d_node_pairs.svg";

    let mut rng = rand::thread_rng();
    let locations: Vec<[f64; 2]> = (0..400)
        .map(|_| [rng.gen_range(40.0..60.0), rng.gen_range(40.0..60.0)])
        .collect();

    let mut mesh = NodeCollection::<2>::new();
    mesh.construct_nodes_without_mesh(&locations, 1.5)?;

    for step in 0..20 {
        for id in mesh.node_indices() {
            let loc = *mesh.node(id)?.location();
            mesh.set_node_location(id, [loc[0] + rng.gen_range(-1.0..1.0), loc[1] + rng.gen_range(-1.0..1.0)])?;
        }
        if step % 5 == 4 {
            let ids = mesh.node_indices();
            for _ in 0..10 {
                let id = ids[rng.gen_range(0..ids.len())];
                // Picking the same node twice is fine, it just stays deleted.
                let _ = mesh.delete_node(id);
            }
            mesh.remesh()?;
        } else {
            mesh.update_spatial_index()?;
        }
    }

    let pairs = mesh.calculate_node_pairs()?;
    let Some(bounds) = mesh.domain_bounds() else {
        return Ok(());
    };

    let root = SVGBackend::new(filename, (1024, 1024)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .build_cartesian_2d(bounds.min[0]..bounds.max[0], bounds.min[1]..bounds.max[1])?;

    // Draw domain of the spatial index
    chart.draw_series(std::iter::once(PathElement::new(
        vec![
            (bounds.min[0], bounds.min[1]),
            (bounds.max[0], bounds.min[1]),
            (bounds.max[0], bounds.max[1]),
            (bounds.min[0], bounds.max[1]),
            (bounds.min[0], bounds.min[1]),
        ],
        BLACK.stroke_width(2),
    )))?;

    // Draw neighbor pairs
    for &(a, b) in &pairs.pairs {
        let pa = mesh.node(a)?.location();
        let pb = mesh.node(b)?.location();
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(pa[0], pa[1]), (pb[0], pb[1])],
            BLUE.mix(0.4),
        )))?;
    }

    // Draw nodes
    chart.draw_series(mesh.nodes().map(|n| Circle::new((n.location()[0], n.location()[1]), 2, RED.filled())))?;

    root.present()?;
    println!("{} nodes, {} pairs. Output saved to {}", mesh.num_nodes(), pairs.len(), filename);
    Ok(())
}
