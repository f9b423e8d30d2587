use std::collections::HashMap;

/// Term → feature id. Ids follow first-seen order over the fitted corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    ids: HashMap<String, usize>,
    terms: Vec<String>,
}

impl Vocabulary {
    /// Build from analyzed documents. When more than `max_features` distinct
    /// terms exist, keep the ones with the highest total corpus count; ties go
    /// to the term seen first.
    pub fn build(docs: &[Vec<String>], max_features: usize) -> Self {
        let mut first_seen: Vec<&str> = Vec::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for term in docs.iter().flatten() {
            let count = counts.entry(term.as_str()).or_insert(0);
            if *count == 0 { first_seen.push(term.as_str()); }
            *count += 1;
        }

        let kept: Vec<&str> = if first_seen.len() > max_features {
            let mut order: Vec<usize> = (0..first_seen.len()).collect();
            order.sort_by(|&a, &b| counts[first_seen[b]].cmp(&counts[first_seen[a]]));
            order.truncate(max_features);
            order.sort_unstable();
            order.into_iter().map(|i| first_seen[i]).collect()
        } else {
            first_seen
        };

        let terms: Vec<String> = kept.into_iter().map(str::to_string).collect();
        let ids = terms.iter().enumerate().map(|(i, t)| (t.clone(), i)).collect();
        Self { ids, terms }
    }

    pub fn get(&self, term: &str) -> Option<usize> { self.ids.get(term).copied() }

    pub fn term(&self, id: usize) -> Option<&str> { self.terms.get(id).map(String::as_str) }

    pub fn terms(&self) -> &[String] { &self.terms }

    pub fn len(&self) -> usize { self.terms.len() }

    pub fn is_empty(&self) -> bool { self.terms.is_empty() }
}
