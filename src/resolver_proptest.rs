//! Property-based tests for dependency resolution.
//!
//! Random acyclic require graphs are written to a temporary site and
//! resolved; the resulting order must hold for every generated graph.

#[cfg(test)]
mod proptest_tests {
    use crate::cache::SourceCache;
    use crate::encoding::TextEncoding;
    use crate::error::Error;
    use crate::resolver::combo;
    use proptest::prelude::*;
    use std::collections::{HashMap, HashSet};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Node `i` may only require nodes below `i`, which keeps the graph acyclic.
    fn acyclic_graph() -> impl Strategy<Value = Vec<Vec<usize>>> {
        (1usize..12).prop_flat_map(|size| {
            (0..size)
                .map(|i| {
                    if i == 0 {
                        Just(Vec::<usize>::new()).boxed()
                    } else {
                        prop::collection::vec(0..i, 0..4).boxed()
                    }
                })
                .collect::<Vec<_>>()
        })
    }

    fn node_name(i: usize) -> String {
        format!("n{}.js", i)
    }

    /// Write the graph as files; the last node is the seed.
    fn write_site(graph: &[Vec<usize>]) -> (TempDir, PathBuf, Vec<PathBuf>) {
        let temp = TempDir::new().unwrap();
        let root = fs::canonicalize(temp.path()).unwrap();
        let paths: Vec<PathBuf> = (0..graph.len()).map(|i| root.join(node_name(i))).collect();

        for (i, requires) in graph.iter().enumerate() {
            let mut content = String::new();
            for dep in requires {
                content.push_str(&format!("// #require <{}>\n", node_name(*dep)));
            }
            content.push_str(&format!("var n{};\n", i));
            fs::write(&paths[i], content).unwrap();
        }

        (temp, root, paths)
    }

    fn reachable(graph: &[Vec<usize>], start: usize) -> HashSet<usize> {
        let mut seen = HashSet::new();
        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            if seen.insert(node) {
                stack.extend(graph[node].iter().copied());
            }
        }
        seen
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        /// Property: every reachable file appears exactly once, after all of
        /// its dependencies, with the seed last
        #[test]
        fn combo_orders_dependencies_first(graph in acyclic_graph()) {
            let (_temp, root, paths) = write_site(&graph);
            let seed_index = graph.len() - 1;

            let mut cache = SourceCache::new(root, TextEncoding::default()).unwrap();
            let order = combo(&mut cache, &paths[seed_index]).unwrap();

            let position: HashMap<&PathBuf, usize> =
                order.iter().enumerate().map(|(i, p)| (p, i)).collect();
            prop_assert_eq!(position.len(), order.len(), "duplicate entries in {:?}", order);

            let expected = reachable(&graph, seed_index);
            prop_assert_eq!(order.len(), expected.len());
            prop_assert_eq!(order.last(), Some(&paths[seed_index]));

            for node in &expected {
                let at = position[&paths[*node]];
                for dep in &graph[*node] {
                    prop_assert!(
                        position[&paths[*dep]] < at,
                        "{} must come before {}", node_name(*dep), node_name(*node)
                    );
                }
            }
        }

        /// Property: an edge back to the seed yields a cycle that starts and
        /// ends at the seed whenever the edge is reachable
        #[test]
        fn combo_reports_cycles(graph in acyclic_graph()) {
            let (_temp, root, paths) = write_site(&graph);
            let seed_index = graph.len() - 1;
            let seed_name = node_name(seed_index);

            // The lowest node always exists; make it require the seed
            let content = format!("// #require <{}>\nvar n0;\n", seed_name);
            fs::write(&paths[0], content).unwrap();

            let mut cache = SourceCache::new(root, TextEncoding::default()).unwrap();
            let result = combo(&mut cache, &paths[seed_index]);

            if reachable(&graph, seed_index).contains(&0) {
                match result {
                    Err(Error::CircularDependency { cycle }) => {
                        prop_assert!(cycle.len() >= 2);
                        prop_assert_eq!(cycle.first(), Some(&paths[seed_index]));
                        prop_assert_eq!(cycle.last(), Some(&paths[seed_index]));
                    }
                    other => prop_assert!(false, "expected a cycle, got {:?}", other),
                }
            } else {
                prop_assert!(result.is_ok());
            }
        }
    }
}
