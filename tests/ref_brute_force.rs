use hmm_lattice::{HmmEngine, ModelTables};
use proptest::prelude::*;

fn normalize(row: Vec<f64>) -> Vec<f64> {
    let sum: f64 = row.iter().sum();
    if sum > 0.0 {
        row.into_iter().map(|x| x / sum).collect()
    } else {
        vec![1.0 / row.len() as f64; row.len()]
    }
}

fn arb_model() -> impl Strategy<Value = (ModelTables<usize, usize>, Vec<usize>)> {
    (1usize..=3, 1usize..=3, 0usize..=5).prop_flat_map(|(n, m, t)| {
        (
            prop::collection::vec(0.0f64..1.0, n),
            prop::collection::vec(prop::collection::vec(0.0f64..1.0, n), n),
            prop::collection::vec(prop::collection::vec(0.0f64..1.0, m), n),
            prop::collection::vec(0..m, t),
        )
            .prop_map(move |(prior, transition, emission, obs)| {
                let tables = ModelTables {
                    observation_states: (0..m).collect(),
                    hidden_states: (0..n).collect(),
                    prior: normalize(prior),
                    transition: transition.into_iter().map(normalize).collect(),
                    emission: emission.into_iter().map(normalize).collect(),
                };
                (tables, obs)
            })
    })
}

/// Every state path of length `t` over `n` states, in lexicographic order.
fn all_paths(n: usize, t: usize) -> Vec<Vec<usize>> {
    let mut paths = vec![Vec::new()];
    for _ in 0..t {
        paths = paths
            .into_iter()
            .flat_map(|p| {
                (0..n).map(move |s| {
                    let mut next = p.clone();
                    next.push(s);
                    next
                })
            })
            .collect();
    }
    paths
}

fn joint(tables: &ModelTables<usize, usize>, obs: &[usize], path: &[usize]) -> f64 {
    let mut p = tables.prior[path[0]] * tables.emission[path[0]][obs[0]];
    for t in 1..obs.len() {
        p *= tables.transition[path[t - 1]][path[t]] * tables.emission[path[t]][obs[t]];
    }
    p
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()) + 1e-300
}

proptest! {
    #[test]
    fn forward_matches_path_enumeration((tables, obs) in arb_model()) {
        let engine = HmmEngine::new(tables.clone()).unwrap();
        let p = engine.forward(&obs).unwrap();
        if obs.is_empty() {
            prop_assert_eq!(p, 0.0);
        } else {
            let total: f64 = all_paths(tables.hidden_states.len(), obs.len())
                .iter()
                .map(|path| joint(&tables, &obs, path))
                .sum();
            prop_assert!(close(p, total), "forward {} vs brute force {}", p, total);
            prop_assert!((0.0..=1.0 + 1e-9).contains(&p));
        }
    }

    #[test]
    fn viterbi_path_is_optimal((tables, obs) in arb_model()) {
        let engine = HmmEngine::new(tables.clone()).unwrap();
        let decoded = engine.decode(&obs).unwrap();
        prop_assert_eq!(decoded.states.len(), obs.len());
        prop_assert_eq!(&decoded.states, &decoded.indices);
        if !obs.is_empty() {
            let mine = joint(&tables, &obs, &decoded.indices);
            let best = all_paths(tables.hidden_states.len(), obs.len())
                .iter()
                .map(|path| joint(&tables, &obs, path))
                .fold(0.0f64, f64::max);
            prop_assert!(mine >= best * (1.0 - 1e-9), "viterbi {} < best {}", mine, best);
            prop_assert!(close(decoded.probability, mine));
        }
    }

    #[test]
    fn log_modes_track_plain_modes((tables, obs) in arb_model()) {
        let engine = HmmEngine::new(tables).unwrap();
        let p = engine.forward(&obs).unwrap();
        let log_p = engine.log_forward(&obs).unwrap();
        if p > 1e-200 {
            prop_assert!((log_p - p.ln()).abs() < 1e-8);
        } else if p == 0.0 {
            prop_assert_eq!(log_p, f64::NEG_INFINITY);
        }
        let plain = engine.decode(&obs).unwrap();
        let log = engine.log_viterbi(&obs).unwrap();
        if plain.probability > 1e-200 {
            prop_assert!((log.probability - plain.probability.ln()).abs() < 1e-8);
        }
    }
}
