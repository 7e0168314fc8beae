mod common;

use common::{generated_routes, l_route, p};
use waypath_lib::{
    build_graph, find_closest_point, parse_routes, snap_to_graph, Error, VertexIndex,
};

#[test]
fn off_graph_point_snaps_to_nearest_vertex() {
    let vertices = [p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0)];
    let closest = find_closest_point(p(1.0, 1.0), &vertices).unwrap();
    assert_eq!(closest, p(0.0, 0.0));
}

#[test]
fn vertex_snaps_to_itself() {
    let graph = build_graph(&l_route());
    for vertex in graph.vertices() {
        assert_eq!(find_closest_point(*vertex, graph.vertices()).unwrap(), *vertex);

        let snap = snap_to_graph(&graph, *vertex).unwrap();
        assert!(snap.is_exact());
        assert_eq!(snap.distance, 0.0);
        assert_eq!(snap.connector(), None);
    }
}

#[test]
fn snapping_onto_an_empty_graph_fails() {
    let graph = build_graph(&[]);
    let err = snap_to_graph(&graph, p(0.0, 0.0)).expect_err("no vertices");
    assert!(matches!(err, Error::EmptyInput));
}

#[test]
fn index_agrees_with_linear_scan() {
    for seed in 0..10 {
        let graph = build_graph(&generated_routes(seed, 40, 20));
        let index = VertexIndex::build(&graph);
        assert_eq!(index.len(), graph.vertex_count());

        for qx in 0..25 {
            for qy in 0..25 {
                // Half-unit offsets create plenty of exact ties on the grid.
                let query = p(qx as f64 * 0.5 - 2.0, qy as f64 * 0.5 - 2.0);
                let expected = find_closest_point(query, graph.vertices()).unwrap();
                let snap = index.nearest(query).unwrap();
                assert_eq!(snap.vertex, expected, "seed {seed}, query {query}");
                assert_eq!(snap.distance, query.distance_to(&expected));
            }
        }
    }
}

#[test]
fn nearest_n_is_sorted_by_distance() {
    let graph = build_graph(&generated_routes(3, 30, 15));
    let index = VertexIndex::build(&graph);
    let query = p(7.3, 7.9);

    let results = index.nearest_n(query, 5);
    assert_eq!(results.len(), 5.min(graph.vertex_count()));
    assert_eq!(results[0].vertex, index.nearest(query).unwrap().vertex);
    for pair in results.windows(2) {
        assert!(pair[0].distance <= pair[1].distance);
    }

    let everything = index.nearest_n(query, graph.vertex_count() + 10);
    assert_eq!(everything.len(), graph.vertex_count());
}

#[test]
fn nearest_n_orders_ties_by_vertex_order() {
    let routes = vec![vec![p(1.0, 0.0), p(0.0, 1.0), p(-1.0, 0.0), p(0.0, -1.0), p(5.0, 5.0)]];
    let graph = build_graph(&routes);
    let index = VertexIndex::build(&graph);

    let results: Vec<_> = index
        .nearest_n(p(0.0, 0.0), 3)
        .into_iter()
        .map(|snap| snap.vertex)
        .collect();
    assert_eq!(results, vec![p(1.0, 0.0), p(0.0, 1.0), p(-1.0, 0.0)]);
}

#[test]
fn nan_vertex_from_route_file_is_never_the_nearest() {
    let routes = parse_routes("(0, 0), (1, 0)\n(nan, 5), (100, 100)\n").expect("nan parses");
    let graph = build_graph(&routes);
    let index = VertexIndex::build(&graph);
    let query = p(0.1, 0.0);

    let scanned = snap_to_graph(&graph, query).unwrap();
    let indexed = index.nearest(query).unwrap();

    assert_eq!(scanned.vertex, p(0.0, 0.0));
    assert_eq!(indexed.vertex, p(0.0, 0.0));
    assert_eq!(scanned.distance, indexed.distance);
}
