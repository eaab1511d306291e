use std::collections::HashMap;

use savesync_core::MediaKind;

use super::*;

struct FixedSource(Vec<Title>);

impl TitleSource for FixedSource {
    fn scan(&self) -> Result<Vec<Title>, TitleError> {
        Ok(self.0.clone())
    }
}

struct FixedNames(HashMap<String, String>);

impl NamesResolver for FixedNames {
    fn resolve(&self, codes: &[String]) -> HashMap<String, String> {
        codes
            .iter()
            .filter_map(|c| self.0.get(c).map(|n| (c.clone(), n.clone())))
            .collect()
    }
}

fn title(title_id: u64, product_code: &str) -> Title {
    Title {
        title_id,
        media_kind: MediaKind::SystemStorage,
        product_code: product_code.to_string(),
        display_name: String::new(),
        has_local_save: true,
        loose_file_path: None,
    }
}

#[test]
fn dedup_keeps_first_source_on_product_code_collision() {
    let a = FixedSource(vec![title(1, "ABCD")]);
    let b = FixedSource(vec![title(2, "ABCD")]);
    let names = FixedNames(HashMap::new());

    let titles = enumerate_titles(&[&a, &b], &names).unwrap();
    assert_eq!(titles.len(), 1);
    assert_eq!(titles[0].title_id, 1);
}

#[test]
fn names_round_trip_resolves_display_name_with_fallback() {
    let a = FixedSource(vec![title(1, "ABCD"), title(2, "")]);
    let names = FixedNames(HashMap::from([("ABCD".to_string(), "Great Game".to_string())]));

    let titles = enumerate_titles(&[&a], &names).unwrap();
    let great = titles.iter().find(|t| t.title_id == 1).unwrap();
    let fallback = titles.iter().find(|t| t.title_id == 2).unwrap();

    assert_eq!(great.display_name, "Great Game");
    assert_eq!(fallback.display_name, title_id_hex(2));
}

#[test]
fn output_is_sorted_case_insensitively_by_display_name() {
    let a = FixedSource(vec![title(1, "ZZZZ"), title(2, "AAAA")]);
    let names = FixedNames(HashMap::from([
        ("ZZZZ".to_string(), "zebra".to_string()),
        ("AAAA".to_string(), "Apple".to_string()),
    ]));

    let titles = enumerate_titles(&[&a], &names).unwrap();
    assert_eq!(titles[0].display_name, "Apple");
    assert_eq!(titles[1].display_name, "zebra");
}

#[test]
fn scanning_twice_with_unchanged_sources_is_idempotent() {
    let a = FixedSource(vec![title(1, "ABCD"), title(2, "EFGH")]);
    let names = FixedNames(HashMap::new());

    let first = enumerate_titles(&[&a], &names).unwrap();
    let second = enumerate_titles(&[&a], &names).unwrap();

    let first_ids: Vec<u64> = first.iter().map(|t| t.title_id).collect();
    let second_ids: Vec<u64> = second.iter().map(|t| t.title_id).collect();
    assert_eq!(first_ids, second_ids);
}
