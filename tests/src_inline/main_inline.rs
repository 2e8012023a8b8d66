use super::*;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    let mut argv = vec!["subtype-latentdiff"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv)
}

const INPUTS: [&str; 6] = ["--latent", "z.tsv", "--meta", "meta.tsv", "--out", "out"];

#[test]
fn test_run_defaults() {
    let mut args = vec!["run"];
    args.extend_from_slice(&INPUTS);
    let cli = parse(&args).unwrap();
    let Command::Run(run) = cli.command else {
        panic!("expected run");
    };
    assert_eq!(run.contrast.contrasts(), default_contrasts());
    assert_eq!(run.contrast.sd_level, 2.5);
    assert_eq!(run.high_weight_sd, 2.0);
    assert!(!run.skip_cluster);
    assert!(run.reference_dir.is_none());

    let input = &run.contrast.input;
    assert_eq!(input.activation, ActivationArg::Sigmoid);
    assert_eq!(input.id_column, "sample_id");
    assert_eq!(input.label_column, "SUBTYPE");
    assert_eq!(input.vocabulary().len(), 4);
    assert_eq!(input.profile().decoder_activation, Activation::Sigmoid);
}

#[test]
fn test_contrast_pairs_and_overrides() {
    let mut args = vec![
        "contrast",
        "--contrast",
        "Mesenchymal:Proliferative",
        "--contrast",
        "Immunoreactive:Differentiated",
        "--sd-level",
        "2",
        "--activation",
        "linear",
        "--subtypes",
        "Mesenchymal,Proliferative,Immunoreactive,Differentiated",
        "--no-projection",
    ];
    args.extend_from_slice(&INPUTS);
    let Command::Contrast(c) = parse(&args).unwrap().command else {
        panic!("expected contrast");
    };
    let contrasts = c.contrasts();
    assert_eq!(contrasts.len(), 2);
    assert_eq!(contrasts[0], Contrast::new("Mesenchymal", "Proliferative"));
    assert!(c.no_projection);

    let profile = c.profile();
    assert_eq!(profile.quantile_sd, 2.0);
    assert_eq!(profile.empirical_sd, 2.0);
    assert_eq!(profile.histogram_bins, 20);
    assert_eq!(profile.decoder_activation, Activation::Linear);
    assert_eq!(c.input.vocabulary()[1], "Proliferative");
}

#[test]
fn test_contrast_rejects_malformed_pair() {
    let mut args = vec!["contrast", "--contrast", "Mesenchymal"];
    args.extend_from_slice(&INPUTS);
    assert!(parse(&args).is_err());

    let mut args = vec!["contrast", "--contrast", "Mesenchymal:Mesenchymal"];
    args.extend_from_slice(&INPUTS);
    assert!(parse(&args).is_err());
}

#[test]
fn test_high_weight_requires_subtype() {
    let mut args = vec!["high-weight"];
    args.extend_from_slice(&INPUTS);
    assert!(parse(&args).is_err());

    let mut args = vec!["high-weight", "--subtype", "Immunoreactive"];
    args.extend_from_slice(&INPUTS);
    let Command::HighWeight(h) = parse(&args).unwrap().command else {
        panic!("expected high-weight");
    };
    assert_eq!(h.targets, vec!["Immunoreactive".to_string()]);
    assert_eq!(h.sd_level, 2.0);
}

#[test]
fn test_missing_latent_is_error() {
    assert!(parse(&["centroids", "--meta", "m.tsv", "--out", "o"]).is_err());
    assert!(parse(&["cluster-quality"]).is_err());
}

#[test]
fn test_compare_modes() {
    let Command::Compare(c) =
        parse(&["compare", "--ours", "a.txt", "--theirs", "b.tsv", "--out", "o"])
            .unwrap()
            .command
    else {
        panic!("expected compare");
    };
    assert_eq!(c.ours, Some(PathBuf::from("a.txt")));
    assert!(c.plan.is_none());

    assert!(parse(&["compare", "--ours", "a.txt", "--out", "o"]).is_err());
    assert!(
        parse(&[
            "compare", "--ours", "a.txt", "--theirs", "b.tsv", "--plan", "p.tsv", "--out", "o"
        ])
        .is_err()
    );
}

#[test]
fn test_tally_reports_failures() {
    let mut tally = Tally::default();
    assert_eq!(tally.keep("ok", Ok::<_, AnalysisError>(1)), Some(1));
    let failed: Result<(), AnalysisError> = Err(AnalysisError::EmptyGroup("x".to_string()));
    assert!(tally.keep("bad", failed).is_none());
    let err = tally.finish().unwrap_err();
    assert!(matches!(err, AnalysisError::Incomplete(1, 2)));
    assert!(Tally::default().finish().is_ok());
}

#[test]
fn test_repeated_contrast_runs_once() {
    let mut args = vec![
        "contrast",
        "--contrast",
        "Mesenchymal:Immunoreactive",
        "--contrast",
        "Mesenchymal:Immunoreactive",
    ];
    args.extend_from_slice(&INPUTS);
    let Command::Contrast(c) = parse(&args).unwrap().command else {
        panic!("expected contrast");
    };
    assert_eq!(
        c.contrasts(),
        vec![Contrast::new("Mesenchymal", "Immunoreactive")]
    );
}
