pub const LOGO: &str = r#"
      _
  ___| |_ __   __
 |_  / __|\ \ / /
  / /| |_  \ V /
 /___|\__|  \_/   zendesk ticket viewer
"#;
