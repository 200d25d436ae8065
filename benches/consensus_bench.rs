//! Benchmarks for vote-consensus-rs.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use vote_consensus_rs::{
    calculate_group_aware_consensus, find_optimal_clusters, ConsensusPipeline, Group,
    KMeansConfig, PcaConfig, PcaProjector, PipelineConfig, SweepConfig, VoteMatrix,
};

/// Deterministic synthetic matrix with two loose voting blocs.
fn synthetic_matrix(participants: usize, comments: usize) -> VoteMatrix {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let rows = (0..participants)
        .map(|participant| {
            let bloc = participant < participants / 2;
            (0..comments)
                .map(|comment| {
                    let lean = (comment < comments / 2) == bloc;
                    // Mostly vote the bloc line, with some noise and passes.
                    match rng.gen_range(0..10) {
                        0 => 0,
                        1 | 2 => {
                            if lean {
                                -1
                            } else {
                                1
                            }
                        }
                        _ => {
                            if lean {
                                1
                            } else {
                                -1
                            }
                        }
                    }
                })
                .collect()
        })
        .collect();
    VoteMatrix::new(rows).unwrap()
}

fn bench_pca(c: &mut Criterion) {
    let mut group = c.benchmark_group("pca_project");
    for &participants in &[50usize, 200] {
        let matrix = synthetic_matrix(participants, 30);
        let projector = PcaProjector::new(PcaConfig::default());
        group.bench_with_input(
            BenchmarkId::from_parameter(participants),
            &matrix,
            |b, matrix| b.iter(|| projector.project(black_box(matrix)).unwrap()),
        );
    }
    group.finish();
}

fn bench_silhouette_sweep(c: &mut Criterion) {
    let matrix = synthetic_matrix(100, 30);
    let projector = PcaProjector::new(PcaConfig::default());
    let projection = projector.project(&matrix).unwrap();
    let points: Vec<[f64; 2]> = projection.iter().map(|p| [p.x, p.y]).collect();

    c.bench_function("silhouette_sweep_100_points", |b| {
        b.iter(|| {
            find_optimal_clusters(
                black_box(&points),
                &SweepConfig::default(),
                &KMeansConfig::default(),
            )
            .unwrap()
        });
    });
}

fn bench_consensus_scoring(c: &mut Criterion) {
    let matrix = synthetic_matrix(200, 50);
    let half: Vec<usize> = (0..100).collect();
    let rest: Vec<usize> = (100..200).collect();
    let groups = vec![
        Group {
            centroid: [0.0, 0.0],
            members: half,
        },
        Group {
            centroid: [0.0, 0.0],
            members: rest,
        },
    ];

    c.bench_function("consensus_scoring_200x50", |b| {
        b.iter(|| calculate_group_aware_consensus(black_box(&matrix), black_box(&groups)));
    });
}

fn bench_full_pipeline(c: &mut Criterion) {
    let matrix = synthetic_matrix(100, 30);
    let pipeline = ConsensusPipeline::new(PipelineConfig::default());

    c.bench_function("full_pipeline_100x30", |b| {
        b.iter(|| pipeline.analyze(black_box(&matrix)).unwrap());
    });
}

criterion_group!(
    benches,
    bench_pca,
    bench_silhouette_sweep,
    bench_consensus_scoring,
    bench_full_pipeline
);
criterion_main!(benches);
