use curtail_core::state::premade::BTreeMemoTable;
use curtail_shared_tests::suites::*;


#[test]
fn terminals() {
    test_terminals::<BTreeMemoTable>();
}

#[test]
fn laws() {
    test_laws::<BTreeMemoTable>();
}

#[test]
fn choice() {
    test_choice::<BTreeMemoTable>();
}

#[test]
fn left_recursion() {
    test_left_recursion::<BTreeMemoTable>();
}

#[test]
fn parities() {
    test_parities::<BTreeMemoTable>();
}

#[test]
fn curtailment() {
    test_curtailment::<BTreeMemoTable>();
}

#[test]
fn repetition() {
    test_repetition::<BTreeMemoTable>();
}
