use std::collections::HashMap;

use asksol_core::config::RetrievalSettings;
use asksol_core::types::CorpusEntry;
use asksol_retrieval::{RetrieveParams, Retriever, RetrieverFactory, SCORE_FLOOR};
use asksol_text::{similarity, Thesaurus};
use proptest::prelude::*;

fn fee_corpus() -> Vec<CorpusEntry> {
    vec![
        CorpusEntry::new("What is the fee for MBA?", "MBA fee is 2 lakh per year"),
        CorpusEntry::new("What is the MBA fee?", "MBA fee is 2 lakh per year"),
        CorpusEntry::new("What is the hostel fee?", "Hostel fee is 50k per year"),
    ]
}

fn campus_corpus() -> Vec<CorpusEntry> {
    let mut entries = fee_corpus();
    entries.extend([
        CorpusEntry::new("What is the library fee?", "Library membership costs 500 per year"),
        CorpusEntry::new("When does the library open?", "The library opens at 8 am"),
        CorpusEntry::new("Is there a late fee for library books?", "Late returns cost 10 per day"),
        CorpusEntry::new("What are the MSc admission requirements?", "A bachelor's degree with 55% marks"),
        CorpusEntry::new("How do I apply for MSc?", "Apply online through the admissions portal"),
    ]);
    entries
}

fn default_retriever(entries: &[CorpusEntry]) -> Retriever {
    RetrieverFactory::from_settings(&RetrievalSettings::default(), None).build(entries)
}

#[test]
fn near_identical_answers_collapse_to_the_best_entry() {
    let retriever = default_retriever(&fee_corpus());
    let params = RetrieveParams { top_k: 5, threshold: 0.0, dedupe_threshold: 0.85 };
    let result = retriever.retrieve("MBA fees", &params);

    let mba: Vec<_> = result.accepted.iter().filter(|r| r.answer.starts_with("MBA")).collect();
    assert_eq!(mba.len(), 1, "one of the two MBA entries survives dedup");
    assert_eq!(result.accepted[0].question, "What is the MBA fee?");
    assert!((result.accepted[0].score - 1.0).abs() < 1e-9);
    let last = result.accepted.last().unwrap();
    assert_eq!(last.answer, "Hostel fee is 50k per year", "hostel entry ranks last");
    assert_eq!(result.accepted, result.considered);
}

#[test]
fn stop_word_only_query_returns_nothing() {
    let retriever = default_retriever(&fee_corpus());
    let result = retriever.retrieve("the a of", &RetrieveParams::default().with_threshold(0.0));
    assert!(result.accepted.is_empty());
    assert!(result.considered.is_empty());
}

#[test]
fn misspelled_query_is_caught_by_fuzzy_fallback() {
    let retriever = default_retriever(&campus_corpus());
    let best = retriever.fuzzy_fallback("libary fee", 1, 0.85);
    assert_eq!(best.len(), 1);
    assert_eq!(best[0].question, "What is the library fee?");
    assert!(best[0].score > 0.5 && best[0].score < 1.0, "score {}", best[0].score);
    assert!((best[0].score - 20.0 / 34.0).abs() < 1e-12);
}

#[test]
fn fuzzy_fallback_dedupes_answers_too() {
    let retriever = default_retriever(&fee_corpus());
    let results = retriever.fuzzy_fallback("what is the mba fee", 3, 0.85);
    let answers: Vec<&str> = results.iter().map(|r| r.answer.as_str()).collect();
    assert_eq!(answers, vec!["MBA fee is 2 lakh per year", "Hostel fee is 50k per year"]);
}

#[test]
fn threshold_only_splits_accepted_from_considered() {
    let retriever = default_retriever(&campus_corpus());
    let loose = retriever.retrieve("library fee", &RetrieveParams::default().with_threshold(0.0));
    let strict = retriever.retrieve("library fee", &RetrieveParams::default().with_threshold(0.99));
    assert_eq!(loose.considered, strict.considered);
    assert!(loose.accepted.len() >= strict.accepted.len());
    assert!(!loose.considered.is_empty());
    assert_eq!(loose.best().unwrap().question, "What is the library fee?");
}

#[test]
fn empty_corpus_is_not_an_error() {
    let retriever = default_retriever(&[]);
    assert!(retriever.retrieve("anything", &RetrieveParams::default()).is_empty());
    assert!(retriever.fuzzy_fallback("anything", 3, 0.85).is_empty());
}

#[test]
fn scoped_retrievers_are_independent() {
    let factory = RetrieverFactory::from_settings(&RetrievalSettings::default(), None);
    let all = campus_corpus();
    let global = factory.build(&all);
    let msc = factory.build(&all[6..]);
    assert_eq!(msc.len(), 2);
    assert!(msc.vocabulary_len() < global.vocabulary_len());

    let params = RetrieveParams::default().with_threshold(0.0);
    let scoped = msc.retrieve("msc admission requirements", &params);
    assert_eq!(scoped.considered[0].answer, "A bachelor's degree with 55% marks");
    // the global index still works after the scoped one was dropped
    drop(msc);
    assert!(!global.retrieve("msc admission", &params).is_empty());
}

#[test]
fn synonyms_widen_recall_when_enabled() {
    let mut map = HashMap::new();
    map.insert("dorm".to_string(), vec![vec!["dormitory".to_string(), "hostel".to_string()]]);
    let thesaurus = Thesaurus::from_map(map);

    let settings = RetrievalSettings { use_synonyms: true, ..RetrievalSettings::default() };
    let with = RetrieverFactory::from_settings(&settings, Some(&thesaurus)).build(&fee_corpus());
    let without = RetrieverFactory::from_settings(&RetrievalSettings::default(), Some(&thesaurus)).build(&fee_corpus());
    assert!(with.expands_synonyms());
    assert!(!without.expands_synonyms());

    let params = RetrieveParams::default().with_threshold(0.0);
    assert!(without.retrieve("dorm", &params).is_empty());
    let hit = with.retrieve("dorm", &params);
    assert_eq!(hit.best().unwrap().answer, "Hostel fee is 50k per year");
}

fn synonym_retriever(entries: &[(&str, &[&str])], lemmatize: bool, corpus: &[CorpusEntry]) -> Retriever {
    let map: HashMap<String, Vec<Vec<String>>> = entries
        .iter()
        .map(|(key, phrases)| ((*key).to_string(), vec![phrases.iter().map(|p| (*p).to_string()).collect()]))
        .collect();
    let settings = RetrievalSettings { use_synonyms: true, use_lemmatizer: lemmatize, ..RetrievalSettings::default() };
    RetrieverFactory::from_settings(&settings, Some(&Thesaurus::from_map(map))).build(corpus)
}

#[test]
fn synonym_keys_that_stem_differently_still_expand() {
    let params = RetrieveParams::default().with_threshold(0.0);
    for lemmatize in [false, true] {
        let dorm = synonym_retriever(&[("dormitory", &["hostel"][..])], lemmatize, &fee_corpus());
        let hit = dorm.retrieve("dormitory", &params);
        assert_eq!(hit.best().map(|r| r.answer.as_str()), Some("Hostel fee is 50k per year"), "lemmatize={lemmatize}");

        let reading = synonym_retriever(&[("reading", &["library"][..])], lemmatize, &campus_corpus());
        let hit = reading.retrieve("reading room hours", &params);
        let best = hit.best().unwrap_or_else(|| panic!("no match, lemmatize={lemmatize}"));
        assert!(best.question.contains("library"), "lemmatize={lemmatize}: {}", best.question);
    }
}

#[test]
fn repeated_queries_return_identical_results() {
    let retriever = default_retriever(&campus_corpus());
    let params = RetrieveParams::default().with_threshold(0.0);
    for q in ["library", "MSc apply", "fee per year", "late books"] {
        assert_eq!(retriever.retrieve(q, &params), retriever.retrieve(q, &params));
        assert_eq!(retriever.fuzzy_fallback(q, 3, 0.85), retriever.fuzzy_fallback(q, 3, 0.85));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn retrieval_invariants_hold(
        query in "[A-Za-z ?]{0,40}",
        top_k in 1usize..8,
        threshold in 0.0f64..1.0,
        dedupe_threshold in 0.3f64..1.0,
    ) {
        let retriever = default_retriever(&campus_corpus());
        let params = RetrieveParams { top_k, threshold, dedupe_threshold };
        let result = retriever.retrieve(&query, &params);

        prop_assert!(result.considered.len() <= top_k);
        for r in &result.considered {
            prop_assert!((0.0..=1.0).contains(&r.score));
            prop_assert!(r.score >= SCORE_FLOOR);
        }
        for pair in result.considered.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
        for (i, a) in result.considered.iter().enumerate() {
            for b in &result.considered[i + 1..] {
                prop_assert!(similarity(&a.answer, &b.answer) < dedupe_threshold);
            }
        }
        let expected: Vec<_> = result.considered.iter().filter(|r| r.score >= threshold).cloned().collect();
        prop_assert_eq!(&result.accepted, &expected);
        prop_assert_eq!(&result.accepted[..], &result.considered[..result.accepted.len()]);
    }

    #[test]
    fn fallback_always_answers_on_non_empty_corpus(query in ".{0,40}") {
        let retriever = default_retriever(&campus_corpus());
        let best = retriever.fuzzy_fallback(&query, 1, 0.85);
        prop_assert_eq!(best.len(), 1);
        prop_assert!((0.0..=1.0).contains(&best[0].score));
    }
}
