use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use report_sections::{BoundaryParser, Section, SectionId, SectionLedger};

fn assert_dense(ledger: &SectionLedger) {
    let orders: Vec<usize> = ledger.to_ordered_list().map(Section::order).collect();
    let expected: Vec<usize> = (0..ledger.len()).collect();
    assert_eq!(orders, expected);
    assert!(ledger.check_invariant().is_ok());
}

fn ids(ledger: &SectionLedger) -> Vec<SectionId> {
    ledger.to_ordered_list().map(Section::id).collect()
}

#[test]
fn test_invariant_holds_across_mixed_operations() {
    let mut ledger = SectionLedger::new();
    // 固定種子，讓操作序列可重現
    let mut rng = StdRng::seed_from_u64(0x2545_f491);

    for step in 0..500 {
        let known = ids(&ledger);
        match rng.gen_range(0..5) {
            0 => {
                ledger.append(format!("s{step}"), "");
            }
            1 => {
                let index = rng.gen_range(0..known.len() + 3);
                ledger.insert_at(index, format!("s{step}"), "");
            }
            2 if !known.is_empty() => {
                ledger.delete(known[rng.gen_range(0..known.len())]);
            }
            3 if !known.is_empty() => {
                let id = known[rng.gen_range(0..known.len())];
                ledger.move_section(id, rng.gen_range(0..known.len() + 3));
            }
            4 => {
                let count = rng.gen_range(0..3);
                ledger.merge_append((0..count).map(|i| (format!("m{step}-{i}"), "x")));
            }
            _ => {
                ledger.delete(SectionId::generate());
            }
        }
        assert_dense(&ledger);
    }
}

#[test]
fn test_delete_twice_equals_delete_once() {
    let mut once = SectionLedger::new();
    once.merge_append([("a", "1"), ("b", "2"), ("c", "3")]);
    let mut twice = once.clone();
    let target = ids(&once)[1];

    once.delete(target);
    twice.delete(target);
    twice.delete(target);

    assert_eq!(once, twice);
    assert_dense(&twice);
}

#[test]
fn test_move_to_own_position_changes_nothing() {
    let mut ledger = SectionLedger::new();
    ledger.merge_append([("a", ""), ("b", ""), ("c", ""), ("d", "")]);
    let before = ledger.clone();

    for section in before.to_ordered_list() {
        assert!(!ledger.move_section(section.id(), section.order()));
    }
    assert_eq!(ledger, before);
}

#[test]
fn test_move_last_to_front() {
    let mut ledger = SectionLedger::new();
    let a = ledger.append("a", "").id();
    let b = ledger.append("b", "").id();
    let c = ledger.append("c", "").id();

    ledger.move_section(c, 0);

    let placed: Vec<(SectionId, usize)> = ledger
        .to_ordered_list()
        .map(|s| (s.id(), s.order()))
        .collect();
    assert_eq!(placed, vec![(c, 0), (a, 1), (b, 2)]);
}

#[test]
fn test_merge_parser_output_after_existing_sections() {
    let mut ledger = SectionLedger::new();
    let first = ledger.append("Portada", "").clone();
    let second = ledger.append("Presentación", "texto").clone();

    let parsed = BoundaryParser::new().parse(
        "plan.docx",
        "Objetivos:\nTexto A\n\nMetodología:\nTexto B",
    );
    assert_eq!(ledger.merge_append(parsed), 2);

    assert_eq!(ledger.len(), 4);
    assert_dense(&ledger);

    let sections: Vec<&Section> = ledger.to_ordered_list().collect();
    assert_eq!(sections[0], &first);
    assert_eq!(sections[1], &second);
    assert_eq!(sections[2].title(), "Objetivos");
    assert_eq!(sections[2].content(), "Texto A");
    assert_eq!(sections[3].title(), "Metodología");
    assert_eq!(sections[3].content(), "Texto B");
}

#[test]
fn test_delete_missing_id_keeps_three_sections() {
    let mut ledger = SectionLedger::new();
    ledger.merge_append([("a", ""), ("b", ""), ("c", "")]);
    let before = ledger.clone();

    assert!(ledger.delete(SectionId::generate()).is_none());

    assert_eq!(ledger, before);
    assert_eq!(ledger.len(), 3);
    assert_dense(&ledger);
}

#[test]
fn test_merged_ids_are_unique() {
    let mut source = SectionLedger::new();
    source.merge_append([("a", ""), ("b", "")]);

    let mut target = source.clone();
    target.merge_from(&source);

    let mut all = ids(&target);
    all.sort_by_key(|id| id.to_string());
    all.dedup();
    assert_eq!(all.len(), 4);
}
