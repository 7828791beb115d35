use std::sync::{Arc, RwLock};
use std::thread;

use halberd::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_word(rng: &mut StdRng) -> String {
    let length = rng.random_range(1..=6);
    (0..length)
        .map(|_| rng.random_range(b'a'..=b'h') as char)
        .collect()
}

fn random_text(rng: &mut StdRng, words: usize) -> String {
    (0..words)
        .map(|_| random_word(rng))
        .collect::<Vec<_>>()
        .join(" ")
}

fn random_query(rng: &mut StdRng) -> String {
    (0..rng.random_range(1..=6))
        .map(|_| {
            let word = random_word(rng);
            if rng.random_bool(0.2) {
                format!("-{word}")
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn random_engine(seed: u64, documents: usize) -> SearchEngine {
    let mut rng = StdRng::seed_from_u64(seed);
    let config = EngineConfig::new("a b").with_shard_count(3);
    let mut engine = SearchEngine::with_config(config).unwrap();
    for id in 0..documents as DocumentId {
        let status = match id % 4 {
            0 => DocumentStatus::Banned,
            _ => DocumentStatus::Actual,
        };
        let ratings: Vec<i32> = (0..rng.random_range(0..4))
            .map(|_| rng.random_range(-10..=10))
            .collect();
        let words = rng.random_range(0..20);
        engine
            .add_document(id, &random_text(&mut rng, words), status, &ratings)
            .unwrap();
    }
    engine
}

#[test]
fn test_sequential_and_parallel_ranking_agree() {
    let engine = random_engine(1, 300);
    let mut rng = StdRng::seed_from_u64(2);

    for _ in 0..200 {
        let query = random_query(&mut rng);
        let sequential = engine
            .find_top_documents_with(ExecutionPolicy::Sequential, &query, ByStatus::default())
            .unwrap();
        let parallel = engine
            .find_top_documents_with(ExecutionPolicy::Parallel, &query, ByStatus::default())
            .unwrap();
        assert_eq!(sequential, parallel, "query {query:?}");
        assert!(sequential.len() <= 5);
    }
}

#[test]
fn test_sequential_and_parallel_matching_agree() {
    let engine = random_engine(3, 100);
    let mut rng = StdRng::seed_from_u64(4);

    for _ in 0..200 {
        let query = random_query(&mut rng);
        let id = rng.random_range(0..100);
        let sequential = engine.match_document(&query, id).unwrap();
        let parallel = engine.match_document_parallel(&query, id).unwrap();
        assert_eq!(sequential, parallel, "query {query:?} on {id}");
    }
}

#[test]
fn test_sequential_and_parallel_removal_agree() {
    let mut sequential = random_engine(5, 200);
    let mut parallel = random_engine(5, 200);
    let mut rng = StdRng::seed_from_u64(6);

    for _ in 0..100 {
        let id = rng.random_range(0..200);
        let a = sequential.remove_document(id);
        let b = parallel.remove_document_parallel(id);
        assert_eq!(a.is_ok(), b.is_ok());
    }

    assert_eq!(
        sequential.document_ids().collect::<Vec<_>>(),
        parallel.document_ids().collect::<Vec<_>>()
    );
    for id in &sequential {
        assert_eq!(sequential.word_frequencies(id), parallel.word_frequencies(id));
    }
    assert!(sequential.verify_consistency().is_ok());
    assert!(parallel.verify_consistency().is_ok());
}

#[test]
fn test_concurrent_readers() {
    let engine = random_engine(7, 200);
    let mut rng = StdRng::seed_from_u64(8);
    let queries: Vec<String> = (0..50).map(|_| random_query(&mut rng)).collect();
    let expected: Vec<Vec<Document>> = queries
        .iter()
        .map(|query| engine.find_top_documents(query).unwrap())
        .collect();

    thread::scope(|scope| {
        for worker in 0..4 {
            let (engine, queries, expected) = (&engine, &queries, &expected);
            scope.spawn(move || {
                let policy = ExecutionPolicy::ALL[worker % 2];
                for (query, expected) in queries.iter().zip(expected) {
                    let results = engine
                        .find_top_documents_with(policy, query, ByStatus::default())
                        .unwrap();
                    assert_eq!(&results, expected);
                    for document in &results {
                        engine.match_document_with(policy, query, document.id).unwrap();
                    }
                }
            });
        }
    });

    let batched = process_queries(&engine, &queries).unwrap();
    assert_eq!(batched, expected);
}

#[test]
fn test_shared_engine_behind_lock() {
    let engine = Arc::new(RwLock::new(random_engine(9, 50)));

    let writer = {
        let engine = Arc::clone(&engine);
        thread::spawn(move || {
            for id in 50..100 {
                engine
                    .write()
                    .unwrap()
                    .add_document(id, "shared writer text", DocumentStatus::Actual, &[1])
                    .unwrap();
            }
            for id in (50..100).step_by(2) {
                engine.write().unwrap().remove_document_parallel(id).unwrap();
            }
        })
    };

    let readers: Vec<_> = (0..3)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                for _ in 0..100 {
                    let results = engine.read().unwrap().find_top_documents("shared").unwrap();
                    assert!(results.len() <= 5);
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    let engine = engine.read().unwrap();
    assert_eq!(engine.document_count(), 75);
    assert_eq!(engine.documents_containing("writer").len(), 25);
    assert!(engine.verify_consistency().is_ok());
}
