//! Swagger UI documentation page.
//!
//! A single static HTML page per app, pointing the stock Swagger UI bundle
//! at the generated `/api/{app}/swagger.json` document. The dark theme is
//! embedded so the page works without any local static assets.

const DARK_THEME_CSS: &str = r#"
body { background-color: #1f1f1f; }
.swagger-ui, .swagger-ui .info .title, .swagger-ui .opblock .opblock-summary-path,
.swagger-ui .opblock-tag, .swagger-ui .model, .swagger-ui .model-title,
.swagger-ui table thead tr th, .swagger-ui .parameter__name,
.swagger-ui .parameter__type, .swagger-ui .response-col_status,
.swagger-ui .opblock .opblock-summary-description, .swagger-ui .markdown p {
    color: #e8e8e8;
}
.swagger-ui .opblock.opblock-get { background: #2b3a4a; border-color: #61affe; }
.swagger-ui .scheme-container { background: #252525; }
.swagger-ui section.models { border-color: #444; }
.topbar { background-color: #161616; padding: 8px; }
"#;

/// Renders the documentation page for one app.
pub fn swagger_ui_page(app_name: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>abi2api - {app_name}</title>
    <link rel="icon" type="image/png" size="32x32" href="https://wallet.multiversx.com/favicon-32x32.png">
    <link rel="stylesheet" type="text/css" href="https://cdnjs.cloudflare.com/ajax/libs/swagger-ui/3.52.1/swagger-ui.min.css">
    <script src="https://cdnjs.cloudflare.com/ajax/libs/swagger-ui/3.52.1/swagger-ui-bundle.min.js"></script>
    <script src="https://cdnjs.cloudflare.com/ajax/libs/swagger-ui/3.52.1/swagger-ui-standalone-preset.min.js"></script>
    <style>{css}</style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script>
        SwaggerUIBundle({{
            url: window.location.origin + "/api/{app_name}/swagger.json",
            dom_id: '#swagger-ui',
            deepLinking: true,
            presets: [
                SwaggerUIBundle.presets.apis,
                SwaggerUIStandalonePreset
            ]
        }});
    </script>
</body>
</html>
"#,
        app_name = app_name,
        css = DARK_THEME_CSS,
    )
}

#[test]
fn page_points_at_the_app_document() {
    let page = swagger_ui_page("calc");
    assert!(page.contains("/api/calc/swagger.json"));
    assert!(page.contains("<title>abi2api - calc</title>"));
}
