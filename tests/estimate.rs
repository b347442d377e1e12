use rand::{rngs::StdRng, SeedableRng};
use std::io::Write;
use treesample::{
    data::{read_graph, Graph},
    error::Error,
    executor::{EstimatorConfig, TreeSampler},
    pattern::{read_query, QueryGraph},
    planner::Dag,
    task::Task,
    types::VId,
};

/// Counts the injective, label and edge preserving mappings of `q` into `d`.
fn count_embeddings(d: &Graph, q: &QueryGraph) -> usize {
    fn extend(d: &Graph, q: &QueryGraph, mapping: &mut Vec<VId>) -> usize {
        let u = mapping.len();
        if u == q.num_vertices() {
            return 1;
        }
        let mut count = 0;
        for v in 0..d.num_vertices() {
            if d.label(v) == q.label(u)
                && !mapping.contains(&v)
                && q.neighbors(u)
                    .iter()
                    .filter(|&&w| w < u)
                    .all(|&w| d.check_edge_exist(mapping[w], v))
            {
                mapping.push(v);
                count += extend(d, q, mapping);
                mapping.pop();
            }
        }
        count
    }
    extend(d, q, &mut vec![])
}

/// Two triangles 0 1 2 and 1 2 3 sharing the edge 1 - 2.
fn create_diamond() -> Graph {
    Graph::new(
        (0..4).map(|v| (v, 1)),
        vec![(0, 1), (0, 2), (1, 2), (1, 3), (2, 3)],
    )
    .unwrap()
}

fn create_triangle(d: &Graph) -> QueryGraph {
    QueryGraph::new(d, (0..3).map(|u| (u, 1)), vec![(0, 1), (1, 2), (2, 0)]).unwrap()
}

fn estimate(d: &Graph, q: &QueryGraph, num_samples: usize, seed: u64) -> f64 {
    let config = EstimatorConfig::default()
        .with_num_samples(num_samples)
        .with_seed(seed);
    Task::new(d, config).unwrap().run(q).unwrap().estimate
}

#[test]
fn test_triangle_is_unbiased() {
    let d = create_diamond();
    let q = create_triangle(&d);
    assert_eq!(count_embeddings(&d, &q), 12);
    let e = estimate(&d, &q, 100_000, 42);
    assert!((e - 12.0).abs() <= 0.6, "estimate {}", e);
}

#[test]
fn test_path_single_edge() {
    let d = Graph::new(vec![(0, 1), (1, 1), (2, 1)], vec![(0, 1), (1, 2)]).unwrap();
    let q = QueryGraph::new(&d, vec![(0, 1), (1, 1)], vec![(0, 1)]).unwrap();
    assert_eq!(count_embeddings(&d, &q), 4);
    let report = Task::new(&d, EstimatorConfig::default().with_num_samples(50_000))
        .unwrap()
        .run(&q)
        .unwrap();
    assert_eq!(report.candidate_set_sizes, [3, 3]);
    assert_eq!(report.total_trees, 50_000);
    assert_eq!(report.completed_trees, 50_000);
    assert!((report.estimate - 4.0).abs() <= 0.2, "estimate {}", report.estimate);
}

#[test]
fn test_labeled_query() {
    // Two labels on a 3 x 3 grid: 0 on even vertices, 1 on odd ones.
    let edges: Vec<_> = (0..9)
        .flat_map(|v| {
            let right = if v % 3 < 2 { Some((v, v + 1)) } else { None };
            let down = if v < 6 { Some((v, v + 3)) } else { None };
            right.into_iter().chain(down)
        })
        .collect();
    let d = Graph::new((0..9).map(|v| (v, (v % 2) as i64)), edges).unwrap();
    let q = QueryGraph::new(
        &d,
        vec![(0, 0), (1, 1), (2, 0), (3, 1)],
        vec![(0, 1), (1, 2), (2, 3)],
    )
    .unwrap();
    let truth = count_embeddings(&d, &q) as f64;
    assert!(truth > 0.0);
    let e = estimate(&d, &q, 200_000, 7);
    assert!((e - truth).abs() <= 0.05 * truth, "estimate {} truth {}", e, truth);
}

#[test]
fn test_same_seed_same_trials() {
    let d = create_diamond();
    let q = create_triangle(&d);
    let dag = Dag::build(&d, &q).unwrap();
    let config = EstimatorConfig::default().with_seed(9);
    let sampler = TreeSampler::new(&d, &q, &dag, &config);
    let draws = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..500).map(|_| sampler.draw(&mut rng)).collect::<Vec<_>>()
    };
    assert_eq!(draws(1), draws(1));
    let run = || {
        let mut sampler = TreeSampler::new(&d, &q, &dag, &config);
        let e = sampler.estimate_embeddings(10_000);
        (e, sampler.total_trees(), sampler.completed_trees())
    };
    assert_eq!(run(), run());
    assert_eq!(estimate(&d, &q, 10_000, 3), estimate(&d, &q, 10_000, 3));
}

#[test]
fn test_running_mean_continues() {
    let d = create_diamond();
    let q = create_triangle(&d);
    let dag = Dag::build(&d, &q).unwrap();
    let config = EstimatorConfig::default().with_seed(1);
    let mut split = TreeSampler::new(&d, &q, &dag, &config);
    split.estimate_embeddings(4096);
    let e = split.estimate_embeddings(4096);
    let mut whole = TreeSampler::new(&d, &q, &dag, &config);
    assert_eq!(whole.estimate_embeddings(8192), e);
    assert_eq!(split.total_trees(), whole.total_trees());
}

#[test]
fn test_dead_trials_count() {
    // A triangle 0 1 2 next to the square 3 4 5 6: trials rooted in the square die.
    let d = Graph::new(
        (0..7).map(|v| (v, 1)),
        vec![(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 6), (6, 3)],
    )
    .unwrap();
    let q = create_triangle(&d);
    assert_eq!(count_embeddings(&d, &q), 6);
    let dag = Dag::build(&d, &q).unwrap();
    let config = EstimatorConfig::default().with_seed(4);
    let mut sampler = TreeSampler::new(&d, &q, &dag, &config);
    let e = sampler.estimate_embeddings(100_000);
    assert_eq!(sampler.total_trees(), 100_000);
    assert!(sampler.completed_trees() > 0);
    assert!(sampler.completed_trees() < 100_000);
    assert!((e - 6.0).abs() <= 0.3, "estimate {}", e);
}

#[test]
fn test_zero_candidates() {
    let d = create_diamond();
    // A 4-clique cannot fit: no data vertex has degree 3 and core number 3.
    let q = QueryGraph::new(
        &d,
        (0..4).map(|u| (u, 1)),
        vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)],
    )
    .unwrap();
    let dag = Dag::build(&d, &q).unwrap();
    let mut sampler = TreeSampler::new(&d, &q, &dag, &EstimatorConfig::default());
    assert!(sampler.candidate_space().has_empty_set());
    assert_eq!(sampler.estimate_embeddings(1000), 0.0);
    assert_eq!(sampler.total_trees(), 0);
    assert_eq!(count_embeddings(&d, &q), 0);
}

#[test]
fn test_disconnected_query() {
    let d = create_diamond();
    let q = QueryGraph::new(&d, (0..4).map(|u| (u, 1)), vec![(0, 1), (2, 3)]).unwrap();
    let task = Task::new(&d, EstimatorConfig::default()).unwrap();
    assert_eq!(task.run(&q).unwrap_err(), Error::DisconnectedQuery);
}

#[test]
fn test_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = dir.path().join("data.graph");
    let query_path = dir.path().join("query.graph");
    let mut data_file = std::fs::File::create(&data_path).unwrap();
    writeln!(
        data_file,
        "t 4 5\nv 0 3 2\nv 1 3 3\nv 2 3 3\nv 3 3 2\ne 0 1\ne 0 2\ne 1 2\ne 1 3\ne 2 3"
    )
    .unwrap();
    std::fs::write(&query_path, "t 3 3\nv 0 3\nv 1 3\nv 2 3\ne 0 1\ne 1 2\ne 2 0\n").unwrap();
    let d = read_graph(&data_path).unwrap();
    let q = read_query(&query_path, &d).unwrap();
    assert_eq!(count_embeddings(&d, &q), 12);
    let e = estimate(&d, &q, 100_000, 0);
    assert!((e - 12.0).abs() <= 0.6, "estimate {}", e);
}
