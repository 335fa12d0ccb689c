use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mindpad_layout::{layout, LayoutConfig};
use mindpad_model::{Element, ElementId, ElementStore};

/// Balanced tree with `breadth` children per node, `depth` levels deep.
fn build_tree(breadth: usize, depth: usize) -> ElementStore {
    let mut store = ElementStore::new();
    let mut next_id = 1u64;
    let root = Element::root(ElementId::from("1"));
    store.insert(root);

    let mut frontier = vec![ElementId::from("1")];
    for _ in 1..depth {
        let mut next_frontier = Vec::new();
        for parent_id in frontier {
            let parent = store.get(&parent_id).unwrap().clone();
            for order in 0..breadth {
                next_id += 1;
                let id = ElementId::new(next_id.to_string());
                let child = Element::child_of(id.clone(), &parent, order);
                store.insert(child);
                next_frontier.push(id);
            }
            store.refresh_child_count(&parent_id);
        }
        frontier = next_frontier;
    }
    store
}

fn layout_small_tree(c: &mut Criterion) {
    let store = build_tree(3, 4);
    let config = LayoutConfig::default();

    c.bench_function("layout_small_tree", |b| {
        b.iter(|| {
            let mut store = store.clone();
            layout(black_box(&mut store), &config);
        })
    });
}

fn layout_interactive_scale_tree(c: &mut Criterion) {
    // ~1400 elements, the upper end of what the UI shows at once.
    let store = build_tree(6, 5);
    let config = LayoutConfig::default();

    c.bench_function("layout_interactive_scale_tree", |b| {
        b.iter(|| {
            let mut store = store.clone();
            layout(black_box(&mut store), &config);
        })
    });
}

criterion_group!(benches, layout_small_tree, layout_interactive_scale_tree);
criterion_main!(benches);
