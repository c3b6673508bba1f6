use probe_client::Modelfile;

#[test]
fn renders_from_line_first() {
    let rendered = Modelfile::from_base("deepseek-coder").render();
    assert_eq!(rendered, "FROM deepseek-coder\n");
}

#[test]
fn parameters_render_in_insertion_order() {
    let rendered = Modelfile::from_base("base")
        .parameter("num_ctx", 2048)
        .parameter("temperature", 0.7)
        .render();

    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(
        lines,
        vec!["FROM base", "PARAMETER num_ctx 2048", "PARAMETER temperature 0.7"]
    );
}

#[test]
fn tuned_derivation_carries_the_full_parameter_set() {
    let rendered = Modelfile::tuned("deepseek-coder").render();

    assert!(rendered.starts_with("FROM deepseek-coder\n"));
    for expected in [
        "PARAMETER num_ctx 2048",
        "PARAMETER num_thread 8",
        "PARAMETER num_gpu 50",
        "PARAMETER temperature 0.7",
        "PARAMETER top_k 40",
        "PARAMETER top_p 0.9",
        "PARAMETER repeat_penalty 1.1",
    ] {
        assert!(rendered.contains(expected), "missing line: {}", expected);
    }
}
