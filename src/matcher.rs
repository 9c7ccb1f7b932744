use crate::cluster::ClusterMatches;
use crate::mol::Mol;

/// Source of occurrences: finds the atom-index tuples one cluster matches in
/// a molecule.
///
/// Substructure search lives outside this crate; any search engine can feed
/// cluster construction through this trait. Closures implement it directly.
pub trait Matcher<A, B> {
    fn find_matches(&self, mol: &Mol<A, B>) -> Vec<Vec<usize>>;
}

impl<A, B, F> Matcher<A, B> for F
where
    F: Fn(&Mol<A, B>) -> Vec<Vec<usize>>,
{
    fn find_matches(&self, mol: &Mol<A, B>) -> Vec<Vec<usize>> {
        self(mol)
    }
}

/// Runs every labelled matcher over every molecule.
///
/// Later matchers with a label already seen replace the earlier result.
pub fn collect_matches<A, B>(
    molecules: &[Mol<A, B>],
    matchers: &[(&str, &dyn Matcher<A, B>)],
) -> ClusterMatches {
    matchers
        .iter()
        .map(|&(label, matcher)| {
            let per_molecule: Vec<Vec<Vec<usize>>> = molecules
                .iter()
                .map(|mol| matcher.find_matches(mol))
                .collect();
            (label.to_string(), per_molecule)
        })
        .collect()
}
