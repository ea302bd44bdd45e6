// main.rs
//
// Minimal walk-through of edge-rivets: select the top rim of a plate, place
// rivets with each layout and distribution mode, and print where they land.

use edge_rivets::{
    CountRounding, EditMesh, Layout, PlacementRequest, PlacementResult, RivetTemplate,
    place_rivets,
};
use nalgebra::{Matrix4, Vector3};

// A type alias for convenience: no template metadata, i.e. S = ()
type Template = RivetTemplate<()>;

fn main() {
    // A 1x1x1 plate lifted 2 units up, with its four top edges selected
    let lift = Matrix4::new_translation(&Vector3::new(0.0, 0.0, 2.0));
    let mut plate = EditMesh::cube(1.0).with_world(lift);
    plate.select_edge(4, 5);
    plate.select_edge(5, 6);
    plate.select_edge(6, 7);
    plate.select_edge(7, 4);

    let rivet = Template::new("rivet", None).with_scale(Vector3::repeat(0.05));

    let requests = [
        ("fixed, from start", PlacementRequest::fixed(5, 0.2)),
        (
            "fixed, centered",
            PlacementRequest::fixed(4, 0.2).with_layout(Layout::Centered),
        ),
        ("auto, floor", PlacementRequest::auto(10, 0.222)),
        (
            "auto, largest remainder",
            PlacementRequest::auto(10, 0.222).with_rounding(CountRounding::LargestRemainder),
        ),
    ];

    for (label, request) in &requests {
        match place_rivets(&plate, Some(&rivet), request) {
            Ok(result) => report(label, &result),
            Err(err) => eprintln!("{label}: {err}"),
        }
    }
}

fn report(label: &str, result: &PlacementResult<()>) {
    println!("{label}: {} rivets", result.len());
    for edge in &result.edges {
        println!(
            "  edge {}: length {:.3}, {} rivets, spacing {:.3}",
            edge.edge_index, edge.length, edge.count, edge.spacing
        );
    }
    for placement in &result.placements {
        let p = placement.position();
        println!("    ({:.3}, {:.3}, {:.3})", p.x, p.y, p.z);
    }
}
