//! Dispatch benchmarks
//!
//! Measures member lookup, direct application and `__call__` resolution.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kindrt::builtins::create_native_function;
use kindrt::object::free_object;
use kindrt::{Destructor, NativeFunction, RawObj, Runtime, CALL_MEMBER};
use std::ffi::c_int;

unsafe extern "C" fn first_or_self(function: *mut NativeFunction, argc: c_int, args: *const RawObj) -> RawObj {
    let result = if argc > 0 { *args } else { NativeFunction::as_obj(function) };
    (*result).ref_count.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
    result
}

/// Kinds `base..base + depth` where each one's `__call__` is an object of the
/// next, ending in a native function
fn call_chain(rt: &Runtime, base: u64, depth: u64) -> RawObj {
    let mut target = NativeFunction::as_obj(create_native_function(first_or_self).unwrap());
    for kind in (base..base + depth).rev() {
        rt.register_kind(kind).unwrap();
        rt.set_destructor(kind, Destructor::Native(free_object)).unwrap();
        unsafe {
            rt.set_member(kind, CALL_MEMBER, target).unwrap();
            rt.dec_ref(target).unwrap();
        }
        target = rt.new_object(kind, 0).unwrap();
    }
    target
}

fn bench_dispatch(c: &mut Criterion) {
    let rt = Runtime::new();
    let receiver = call_chain(&rt, 100, 1);
    let function = NativeFunction::as_obj(create_native_function(first_or_self).unwrap());
    unsafe { rt.set_member(100, "run", function).unwrap() };
    let args = [rt.nil()];

    c.bench_function("lookup", |b| {
        b.iter(|| unsafe {
            let member = rt.lookup(black_box(receiver), "run").unwrap();
            rt.dec_ref(member).unwrap();
        });
    });

    c.bench_function("apply_native", |b| {
        b.iter(|| unsafe {
            let result = rt.apply(black_box(function), &args).unwrap();
            rt.dec_ref(result).unwrap();
        });
    });

    c.bench_function("method_call", |b| {
        b.iter(|| unsafe {
            let result = rt.method_call(black_box(receiver), "run", &args).unwrap();
            rt.dec_ref(result).unwrap();
        });
    });

    let mut group = c.benchmark_group("call_chain");
    for depth in [1u64, 4, 16] {
        let callable = call_chain(&rt, 1000 * (depth + 1), depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &callable, |b, &callable| {
            b.iter(|| unsafe {
                let result = rt.apply(black_box(callable), &args).unwrap();
                rt.dec_ref(result).unwrap();
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_dispatch);
criterion_main!(benches);
