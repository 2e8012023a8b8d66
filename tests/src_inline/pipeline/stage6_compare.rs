use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::pipeline::stage6_compare::{
    ComparisonPair, Overlap, compare, default_reference_plan, load_plan, run_comparisons,
};
use crate::report::gene_list::{DirGeneListStore, GeneListStore};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!(
        "subtype_latentdiff_compare_{}_{}",
        std::process::id(),
        id
    ));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn list(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_compare_counts_intersection() {
    let o = compare(&list(&["a", "b", "c"]), &list(&["b", "c", "d"]));
    assert_eq!(
        o,
        Overlap {
            overlap: 2,
            ours_size: 3,
            theirs_size: 3
        }
    );
}

#[test]
fn test_compare_swap_only_swaps_sizes() {
    let ours = list(&["a", "b", "c", "e"]);
    let theirs = list(&["b", "c", "d"]);
    let ab = compare(&ours, &theirs);
    let ba = compare(&theirs, &ours);
    assert_eq!(ab.overlap, ba.overlap);
    assert_eq!(ab.ours_size, ba.theirs_size);
    assert_eq!(ab.theirs_size, ba.ours_size);
}

#[test]
fn test_compare_duplicates_use_set_semantics() {
    let o = compare(&list(&["a", "a", "b"]), &list(&["a", "a"]));
    assert_eq!(o.overlap, 1);
    let o = compare(&list(&["a", "a", "b"]), &list(&["a", "b", "b"]));
    assert_eq!(o.overlap, 2);
}

#[test]
fn test_compare_empty_lists() {
    let o = compare(&[], &[]);
    assert_eq!(o.overlap, 0);
    assert_eq!(o.ours_size, 0);
    let o = compare(&list(&["a"]), &[]);
    assert_eq!(o.overlap, 0);
    assert_eq!(o.ours_size, 1);
}

#[test]
fn test_gene_list_store_round_trip() {
    let dir = make_temp_dir();
    let store = DirGeneListStore::new(&dir);
    let genes = list(&["TP53", "BRCA1", "MYC"]);
    let path = store.write("x_genes_sd.txt", &genes).unwrap();
    assert_eq!(fs::read_to_string(path).unwrap(), "TP53\nBRCA1\nMYC\n");
    let back = store.read("x_genes_sd.txt").unwrap();
    let a: HashSet<_> = genes.iter().collect();
    let b: HashSet<_> = back.iter().collect();
    assert_eq!(a, b);
}

#[test]
fn test_gene_list_store_rejects_names_that_do_not_round_trip() {
    let dir = make_temp_dir();
    let store = DirGeneListStore::new(&dir);
    for bad in [" TP53", "MYC ", "A\tB", "A\nB", ""] {
        let err = store.write("bad.txt", &list(&["BRCA1", bad])).unwrap_err();
        assert!(matches!(err, crate::input::InputError::Parse(_)));
    }
    assert!(!dir.join("bad.txt").exists());

    let genes = list(&["HLA-A", "C1orf43", "ENSG00000141510.17"]);
    store.write("ok.txt", &genes).unwrap();
    assert_eq!(store.read("ok.txt").unwrap(), genes);
}

#[test]
fn test_gene_list_store_reads_first_tsv_column() {
    let dir = make_temp_dir();
    fs::write(dir.join("ref.tsv"), "TP53\t0.9\nMYC\t0.4\n").unwrap();
    let store = DirGeneListStore::new(&dir);
    assert_eq!(store.read("ref.tsv").unwrap(), list(&["TP53", "MYC"]));
}

#[test]
fn test_default_reference_plan() {
    let plan = default_reference_plan();
    assert_eq!(plan.len(), 8);
    assert_eq!(
        plan[0],
        ComparisonPair {
            ours: "mesenchymal_genes_sd.txt".to_string(),
            theirs: "hgsc_node87genes_pos.tsv".to_string(),
        }
    );
    assert_eq!(plan[3].ours, "immunoreactive_genes_sd.txt");
    assert_eq!(plan[3].theirs, "hgsc_node87genes_neg.tsv");
    assert_eq!(plan[7].ours, "differentiated_genes_sd.txt");
    assert_eq!(plan[7].theirs, "hgsc_node79genes_neg.tsv");
}

#[test]
fn test_load_plan_and_run() {
    let dir = make_temp_dir();
    let ours_dir = dir.join("ours");
    let theirs_dir = dir.join("theirs");
    let ours = DirGeneListStore::new(&ours_dir);
    let theirs = DirGeneListStore::new(&theirs_dir);
    ours.write("a.txt", &list(&["a", "b", "c"])).unwrap();
    theirs.write("b.tsv", &list(&["b", "c", "d"])).unwrap();

    let plan_path = dir.join("plan.tsv");
    fs::write(&plan_path, "# ours\ttheirs\na.txt\tb.tsv\n").unwrap();
    let plan = load_plan(&plan_path).unwrap();
    assert_eq!(plan.len(), 1);

    let rows = run_comparisons(&ours, &theirs, &plan).unwrap();
    assert_eq!(rows[0].overlap.overlap, 2);
    assert_eq!(rows[0].ours, "a.txt");
}

#[test]
fn test_load_plan_rejects_single_column() {
    let dir = make_temp_dir();
    let plan_path = dir.join("plan.tsv");
    fs::write(&plan_path, "a.txt\n").unwrap();
    assert!(load_plan(&plan_path).is_err());
}

#[test]
fn test_missing_reference_list_is_error() {
    let dir = make_temp_dir();
    let store = DirGeneListStore::new(&dir);
    let plan = vec![ComparisonPair {
        ours: "nope.txt".to_string(),
        theirs: "nope.tsv".to_string(),
    }];
    assert!(run_comparisons(&store, &store, &plan).is_err());
}
