use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rwalk_ast::factory::*;
use rwalk_ast::Node;
use rwalk_walker::{base, recursive, scope_tree, simple, Table, Visitors};
use std::cell::Cell;

// A module-sized tree: many functions, each with loops, calls and nested closures
fn build_tree(functions: usize) -> Node {
    let body = (0..functions)
        .map(|i| {
            let name = format!("fn{}", i);
            func_decl(
                &name,
                &["a", "b"],
                vec![
                    var("total", Some(num(0.0))),
                    for_stmt(
                        Some(var("i", Some(num(0.0)))),
                        Some(binary("<", ident("i"), ident("a"))),
                        Some(update("++", false, ident("i"))),
                        block(vec![expr_stmt(assign(
                            "+=",
                            ident("total"),
                            call(member(ident("Math"), "max"), vec![ident("i"), ident("b")]),
                        ))]),
                    ),
                    var(
                        "cb",
                        Some(func_expr(
                            None,
                            &["x"],
                            vec![return_stmt(Some(conditional(
                                logical("&&", ident("x"), index(ident("total"), string("k"))),
                                array(vec![Some(ident("x")), None]),
                                object(vec![("v", this())]),
                            )))],
                        )),
                    ),
                    try_stmt(
                        vec![expr_stmt(call(ident("cb"), vec![ident("total")]))],
                        vec![catch("err", vec![throw_stmt(ident("err"))])],
                        None,
                    ),
                    return_stmt(Some(ident("total"))),
                ],
            )
        })
        .collect();
    program(body)
}

fn bench_walk(c: &mut Criterion) {
    let tree = build_tree(500);
    let table = base::<Cell<usize>>();
    let visitors = Visitors::<Cell<usize>>::new().on("Identifier", |_, count: &Cell<usize>| {
        count.set(count.get() + 1)
    });

    c.bench_function("simple_count_identifiers", |b| {
        b.iter(|| {
            let count = Cell::new(0);
            simple(black_box(&tree), &visitors, Some(&table), &count).ok();
            count.get()
        })
    });

    c.bench_function("recursive_no_overrides", |b| {
        let overrides = Table::new();
        b.iter(|| recursive(black_box(&tree), &Cell::new(0), &overrides, Some(&table)).ok())
    });

    c.bench_function("scope_tree", |b| b.iter(|| scope_tree(black_box(&tree)).ok()));
}

criterion_group!(benches, bench_walk);
criterion_main!(benches);
