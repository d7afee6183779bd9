use super::*;

#[test]
fn args_put_formula_last() {
    let r = Tex2Im::new("/tmp/work").with_resolution(200);
    let args = r.args("x^2", Path::new("/tmp/work/out.png"));
    let args: Vec<String> = args
        .into_iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        args,
        vec![
            "-b",
            "transparent",
            "-r",
            "200x200",
            "-o",
            "/tmp/work/out.png",
            "x^2"
        ]
    );
}

#[test]
fn missing_program_is_external_tool_failure() {
    let dir = tempfile::tempdir().unwrap();
    let r = Tex2Im::new(dir.path()).with_program("/nonexistent/tex2im-frameloom");
    let err = r.render("x").unwrap_err();
    assert!(matches!(err, FrameloomError::ExternalTool(_)));
}
