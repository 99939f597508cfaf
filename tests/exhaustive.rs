//! Exhaustive-enumeration cross-check: for small graphs (`m` small
//! enough that `2^m` subgraphs is tractable), brute-forces the
//! histogram by enumerating every edge subset directly and compares
//! against the frontier DP.

use rand::Rng;

use frontrel::graph::Graph;
use frontrel::io::LoadedProblem;
use frontrel::solve;

struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            self.parent[ra] = rb;
        }
    }
}

/// Brute-forces the histogram by enumerating all `2^m` edge subsets.
fn brute_force(g: &Graph, pi: &[f64], is_source: &[bool]) -> Vec<f64> {
    let m = g.edges.len();
    let n = g.n;
    let mut res = vec![0.0f64; n + 1];

    for mask in 0..(1u32 << m) {
        let mut uf = UnionFind::new(n);
        let mut weight = 1.0f64;
        for (i, &(u, v)) in g.edges.iter().enumerate() {
            let present = (mask >> i) & 1 == 1;
            weight *= if present { pi[i] } else { 1.0 - pi[i] };
            if present {
                uf.union(u, v);
            }
        }
        if weight == 0.0 {
            continue;
        }

        let mut roots = std::collections::HashSet::new();
        for v in 0..n {
            if is_source[v] {
                roots.insert(uf.find(v));
            }
        }
        let count = (0..n).filter(|&v| roots.contains(&uf.find(v))).count();
        res[count] += weight;
    }
    res
}

fn random_graph(rng: &mut impl Rng, n: usize, extra_edges: usize) -> Vec<(usize, usize)> {
    // a random spanning tree, then a handful of extra random edges,
    // so the frontier stays small while the topology stays varied.
    let mut order: Vec<usize> = (0..n).collect();
    for i in (1..n).rev() {
        let j = rng.gen_range(0..=i);
        order.swap(i, j);
    }
    let mut edges = Vec::new();
    for i in 1..n {
        let parent = order[rng.gen_range(0..i)];
        edges.push((parent, order[i]));
    }
    for _ in 0..extra_edges {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        if u != v {
            edges.push((u, v));
        }
    }
    edges
}

#[test]
fn brute_force_matches_dp_on_random_small_graphs() {
    let mut rng = rand::thread_rng();

    for trial in 0..15 {
        let n = rng.gen_range(3..7);
        let extra = rng.gen_range(0..3);
        let edges = random_graph(&mut rng, n, extra);
        let m = edges.len();
        assert!(m <= 12, "trial {trial}: m={m} too large for brute force");

        let g = Graph::new(n, edges.clone());
        let pi: Vec<f64> = (0..m).map(|_| rng.gen_range(0.0..=1.0)).collect();
        let mut is_source = vec![false; n];
        let source_count = rng.gen_range(1..=2).min(n);
        for v in 0..source_count {
            is_source[v] = true;
        }

        let expected = brute_force(&g, &pi, &is_source);

        let problem = LoadedProblem {
            graph: g.clone(),
            order: g,
            probabilities: pi,
            is_source,
        };
        let sol = solve(&problem).unwrap();

        assert_eq!(expected.len(), sol.histogram.len(), "trial {trial}");
        for (k, (&e, &a)) in expected.iter().zip(sol.histogram.iter()).enumerate() {
            assert!(
                (e - a).abs() < 1e-9,
                "trial {trial}, k={k}: brute force {e} vs dp {a}"
            );
        }
    }
}
