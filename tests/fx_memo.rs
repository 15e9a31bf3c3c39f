use curtail::state::FxMemoTable;
use curtail_shared_tests::suites::*;


#[test]
fn terminals() {
    test_terminals::<FxMemoTable>();
}

#[test]
fn laws() {
    test_laws::<FxMemoTable>();
}

#[test]
fn choice() {
    test_choice::<FxMemoTable>();
}

#[test]
fn left_recursion() {
    test_left_recursion::<FxMemoTable>();
}

#[test]
fn parities() {
    test_parities::<FxMemoTable>();
}

#[test]
fn curtailment() {
    test_curtailment::<FxMemoTable>();
}

#[test]
fn repetition() {
    test_repetition::<FxMemoTable>();
}

#[test]
fn same_as_btree() {
    test_same_results::<FxMemoTable, curtail::state::BTreeMemoTable>();
}
