use criterion::{criterion_group, criterion_main, Criterion};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::hint::black_box;
use tagged_ptr::{TagValue, TaggedPtr};

#[repr(align(8))]
struct Node(u64);

fn tagged_ptr_new(c: &mut Criterion) {
    let mut node = Node(0);
    let raw: *mut Node = &mut node;
    let mut tag: usize = 0;
    c.bench_function("TaggedPtr: new", |b| {
        b.iter(|| {
            let ptr: TaggedPtr<Node> = TaggedPtr::new(black_box(raw), tag);
            assert_eq!(ptr.pointer(), raw);
            tag += 1;
        })
    });
}

fn tagged_ptr_tag_ops(c: &mut Criterion) {
    let mut node = Node(0);
    let mut ptr: TaggedPtr<Node> = TaggedPtr::new(&mut node, 0);
    c.bench_function("TaggedPtr: merge-mask", |b| {
        b.iter(|| {
            ptr.merge_tag(black_box(TagValue::from(0b101)));
            ptr.mask_tag(black_box(TagValue::from(0b001)));
            assert_eq!(ptr.tag(), 1);
        })
    });
}

fn tagged_ptr_compare_hash(c: &mut Criterion) {
    let nodes = [Node(0), Node(1)];
    let first: TaggedPtr<Node> = TaggedPtr::pointer_to(&nodes[0]);
    let second: TaggedPtr<Node> = TaggedPtr::pointer_to(&nodes[1]);
    c.bench_function("TaggedPtr: compare-hash", |b| {
        b.iter(|| {
            assert!(black_box(first) < black_box(second));
            let mut hasher = DefaultHasher::new();
            first.hash(&mut hasher);
            black_box(hasher.finish());
        })
    });
}

fn tagged_ptr_deref(c: &mut Criterion) {
    let mut node = Node(7);
    let ptr: TaggedPtr<Node> = TaggedPtr::new(&mut node, 3);
    c.bench_function("TaggedPtr: deref", |b| {
        b.iter(|| {
            let value = unsafe { black_box(ptr).as_ref_unchecked().0 };
            assert_eq!(value, 7);
        })
    });
}

criterion_group!(
    tagged_ptr_benches,
    tagged_ptr_new,
    tagged_ptr_tag_ops,
    tagged_ptr_compare_hash,
    tagged_ptr_deref
);
criterion_main!(tagged_ptr_benches);
