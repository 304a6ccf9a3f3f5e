/// A version string with release-aware ordering.
///
/// The version is split into numeric and qualifier segments at `.`, `-`, `_` and at
/// every switch between digits and letters, so `1.2rc1` reads as `1 . 2 . rc . 1`.
/// Numeric segments compare as numbers, trailing zero segments are ignored and
/// qualifiers rank as
/// `alpha < beta < milestone < rc < snapshot < (release) < sp < anything else`.
#[derive(Debug, Clone)]
pub struct ArtifactVersion {
	version: String,
	segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Segment {
	Number(u64),
	Qualifier(String),
}

impl ArtifactVersion {
	pub fn new(version: &str) -> Self {
		let lowered = version.trim().to_lowercase();

		let mut tokens = Vec::<(String, bool)>::new();
		let mut current = String::new();
		let mut current_numeric = false;
		for c in lowered.chars() {
			if matches!(c, '.' | '-' | '_' | '+') {
				if !current.is_empty() {
					tokens.push((std::mem::take(&mut current), current_numeric));
				}
				continue;
			}
			let numeric = c.is_ascii_digit();
			if !current.is_empty() && numeric != current_numeric {
				tokens.push((std::mem::take(&mut current), current_numeric));
			}
			current_numeric = numeric;
			current.push(c);
		}
		if !current.is_empty() {
			tokens.push((current, current_numeric));
		}

		let mut segments: Vec<Segment> = tokens.into_iter().map(|(token, numeric)| {
			if numeric {
				/* Absurdly long numbers still order above everything representable */
				Segment::Number(token.parse::<u64>().unwrap_or(u64::MAX))
			} else {
				Segment::Qualifier(canonical_qualifier(&token).to_string())
			}
		}).collect();

		while segments.last().map_or(false, Segment::is_null) {
			segments.pop();
		}

		ArtifactVersion { version: version.trim().to_string(), segments }
	}

	pub fn as_str(&self) -> &str {
		&self.version
	}
}

fn canonical_qualifier(q: &str) -> &str {
	match q {
		"a" => "alpha",
		"b" => "beta",
		"m" => "milestone",
		"cr" => "rc",
		"ga" | "final" | "release" => "",
		q => q,
	}
}

fn qualifier_rank(q: &str) -> u8 {
	match q {
		"alpha" => 0,
		"beta" => 1,
		"milestone" => 2,
		"rc" => 3,
		"snapshot" => 4,
		"" => 5,
		"sp" => 6,
		_ => 7,
	}
}

impl Segment {
	fn is_null(&self) -> bool {
		match self {
			Segment::Number(n) => *n == 0,
			Segment::Qualifier(q) => q.is_empty(),
		}
	}
}

fn compare_segments(lhs: Option<&Segment>, rhs: Option<&Segment>) -> std::cmp::Ordering {
	use std::cmp::Ordering;

	match (lhs, rhs) {
		(None, None) => Ordering::Equal,
		(Some(Segment::Number(a)), Some(Segment::Number(b))) => a.cmp(b),
		(Some(Segment::Number(_)), Some(Segment::Qualifier(_))) => Ordering::Greater,
		(Some(Segment::Qualifier(_)), Some(Segment::Number(_))) => Ordering::Less,
		(Some(Segment::Qualifier(a)), Some(Segment::Qualifier(b))) => {
			qualifier_rank(a).cmp(&qualifier_rank(b)).then_with(|| a.cmp(b))
		},
		(Some(Segment::Number(a)), None) => if *a == 0 { Ordering::Equal } else { Ordering::Greater },
		(Some(Segment::Qualifier(a)), None) => qualifier_rank(a).cmp(&qualifier_rank("")),
		(None, Some(_)) => compare_segments(rhs, lhs).reverse(),
	}
}

impl Ord for ArtifactVersion {
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		let len = std::cmp::max(self.segments.len(), other.segments.len());
		for i in 0..len {
			match compare_segments(self.segments.get(i), other.segments.get(i)) {
				std::cmp::Ordering::Equal => {},
				ord => return ord,
			}
		}
		std::cmp::Ordering::Equal
	}
}

impl PartialOrd for ArtifactVersion {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl PartialEq for ArtifactVersion {
	fn eq(&self, other: &Self) -> bool {
		self.cmp(other) == std::cmp::Ordering::Equal
	}
}

impl Eq for ArtifactVersion {}

impl std::hash::Hash for ArtifactVersion {
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		self.segments.hash(state);
	}
}

impl std::fmt::Display for ArtifactVersion {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.version)
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn v(s: &str) -> ArtifactVersion { ArtifactVersion::new(s) }

	#[test] fn version_are_not_compared_lexically() { assert!(v("1.2.4") < v("1.2.10")) }
	#[test] fn version_identical_are_eq() { assert!(v("1.2.3") == v("1.2.3")) }
	#[test] fn version_higher_version_is_gt() { assert!(v("1.2.3") < v("1.2.4")) }
	#[test] fn version_trailing_zeros_are_ignored() { assert!(v("1.0") == v("1.0.0")) }
	#[test] fn version_short_version_is_lt() { assert!(v("1.2") < v("1.2.1")) }
	#[test] fn version_release_beats_beta() { assert!(v("1.1.0-beta") < v("1.1.0")) }
	#[test] fn version_release_beats_snapshot() { assert!(v("2.0-SNAPSHOT") < v("2.0")) }
	#[test] fn version_snapshot_beats_rc() { assert!(v("2.0-rc1") < v("2.0-SNAPSHOT")) }
	#[test] fn version_alpha_below_beta() { assert!(v("1.0-alpha2") < v("1.0-beta1")) }
	#[test] fn version_short_aliases() { assert!(v("1.0-a1") == v("1.0-alpha1")) }
	#[test] fn version_final_is_release() { assert!(v("1.0.Final") == v("1.0")) }
	#[test] fn version_service_pack_beats_release() { assert!(v("1.0") < v("1.0-sp1")) }
	#[test] fn version_number_beats_qualifier() { assert!(v("1.0-beta") < v("1.0.1")) }
	#[test] fn version_attached_qualifier_is_split() { assert!(v("1.2rc1") < v("1.2")) }
	#[test] fn version_keeps_original_text() { assert_eq!(v("1.0.0").to_string(), "1.0.0") }

	#[test]
	fn version_newest_is_picked() {
		let versions = vec![v("1.0.0"), v("1.2.0"), v("1.1.0-beta")];
		assert_eq!(versions.into_iter().max().unwrap().as_str(), "1.2.0");
	}
}
