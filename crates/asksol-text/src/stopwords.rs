use std::collections::HashSet;

const ENGLISH: &[&str] = &[
	"a","about","above","after","again","against","all","am","an","and","any","are","as","at","be","because","been","before","being","below","between","both","but","by","cannot","could","did","do","does","doing","down","during","each","few","for","from","further","had","has","have","having","he","her","here","hers","herself","him","himself","his","how","i","if","in","into","is","it","its","itself","let","me","more","most","my","myself","no","nor","not","of","on","once","only","or","other","our","ours","ourselves","out","over","own","same","she","should","so","some","such","than","that","the","their","theirs","them","themselves","then","there","these","they","this","those","through","to","too","under","until","up","very","was","we","what","when","where","which","while","who","whom","why","with","would","you","your","yours","yourself","yourselves",
];

/// Set of tokens removed during normalization. Empty means "filter nothing".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords {
	words: HashSet<String>,
}

impl StopWords {
	pub fn none() -> Self { Self::default() }

	pub fn english() -> Self { ENGLISH.iter().copied().collect() }

	pub fn contains(&self, token: &str) -> bool { self.words.contains(token) }

	pub fn len(&self) -> usize { self.words.len() }

	pub fn is_empty(&self) -> bool { self.words.is_empty() }
}

impl<S: Into<String>> FromIterator<S> for StopWords {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		Self { words: iter.into_iter().map(Into::into).collect() }
	}
}
