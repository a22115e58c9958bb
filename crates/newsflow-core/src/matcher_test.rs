use super::*;

fn taxonomy(entries: &[(&str, &[&str])]) -> Taxonomy {
    Taxonomy::new(entries.iter().map(|(c, kws)| {
        (
            (*c).to_string(),
            kws.iter().map(|k| (*k).to_string()).collect::<Vec<_>>(),
        )
    }))
    .expect("test taxonomy should validate")
}

fn matcher(entries: &[(&str, &[&str])]) -> TaxonomyMatcher {
    TaxonomyMatcher::new(&taxonomy(entries)).expect("patterns should compile")
}

#[test]
fn bitcoin_headline_matches_crypto_category() {
    let m = matcher(&[("crypto", &["bitcoin"])]);
    let matches = m.match_unit("Bitcoin rises 5% as markets react", "");
    assert_eq!(matches, vec!["crypto:bitcoin".to_string()]);
}

#[test]
fn matching_is_case_insensitive() {
    let m = matcher(&[("crypto", &["bitcoin"])]);
    assert_eq!(m.match_sentence("BITCOIN surges"), vec!["crypto:bitcoin"]);
}

#[test]
fn whole_word_only() {
    let m = matcher(&[("crypto", &["bit"])]);
    assert!(
        m.match_sentence("bitcoin surges").is_empty(),
        "'bit' must not match inside 'bitcoin'"
    );
    assert_eq!(m.match_sentence("a bit of news"), vec!["crypto:bit"]);
}

#[test]
fn frequency_orders_keywords_within_category() {
    let m = matcher(&[("crypto", &["bitcoin", "ethereum"])]);
    let matches = m.match_sentence("ethereum beats ethereum while bitcoin lags");
    assert_eq!(matches, vec!["crypto:ethereum", "crypto:bitcoin"]);
}

#[test]
fn ties_keep_artifact_order() {
    let m = matcher(&[("crypto", &["bitcoin", "ethereum"])]);
    let matches = m.match_sentence("bitcoin and ethereum both move");
    assert_eq!(matches, vec!["crypto:bitcoin", "crypto:ethereum"]);
}

#[test]
fn one_text_can_match_multiple_categories() {
    let m = matcher(&[("crypto", &["bitcoin"]), ("tech", &["ai"])]);
    let matches = m.match_unit("AI startups buy bitcoin", "");
    assert!(matches.contains(&"crypto:bitcoin".to_string()));
    assert!(matches.contains(&"tech:ai".to_string()));
    assert_eq!(matches.len(), 2);
}

#[test]
fn unit_fold_deduplicates_across_sentences() {
    let m = matcher(&[("crypto", &["bitcoin"])]);
    let matches = m.match_unit("Bitcoin rallies", "Analysts say bitcoin will keep rising");
    assert_eq!(matches, vec!["crypto:bitcoin".to_string()]);
}

#[test]
fn no_match_returns_empty() {
    let m = matcher(&[("crypto", &["bitcoin"])]);
    assert!(m.match_unit("Weather stays mild", "Rain expected").is_empty());
}

#[test]
fn regex_metacharacters_in_keywords_are_escaped() {
    // "c++" must compile as a literal, not blow up as a malformed pattern.
    let m = matcher(&[("tech", &["c++"])]);
    assert!(m.match_sentence("cpp release notes").is_empty());
}
