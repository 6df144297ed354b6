use crate::{
    config::{DEFAULT_BACKGROUND, GlassConfig},
    sizing::SizingMode,
    style::visual::INSET_HIGHLIGHT_SHADOW,
};

/// Class of the element that receives the generated styles.
pub const SURFACE_CLASS: &str = "glass-box";

/// Shadow-root markup: base styles, the glass surface and a slot for the element's children.
pub fn shadow_markup(config: &GlassConfig) -> String {
    let mode = config.sizing_mode();
    let auto = mode == SizingMode::AutoSize;

    let host_display = if auto { "inline-block" } else { "block" };
    let host_width = if mode == SizingMode::Fluid {
        "\n    width: 100%;"
    } else {
        ""
    };
    let surface_extra = if auto {
        format!(
            "\n    display: inline-block;\n    width: fit-content;\n    min-width: {}px;\n    min-height: {}px;",
            config.min_width, config.min_height
        )
    } else {
        String::new()
    };
    let content_extra = if auto {
        "\n    padding: var(--glass-padding, 16px 24px);"
    } else {
        "\n    width: 100%;\n    height: 100%;"
    };

    format!(
        r#"<style>
  :host {{
    display: {host_display};{host_width}
  }}

  .{SURFACE_CLASS} {{
    background: {DEFAULT_BACKGROUND};
    box-shadow: {INSET_HIGHLIGHT_SHADOW};
    cursor: pointer;
    transition: transform 0.1s ease;
    position: relative;{surface_extra}
  }}

  .{SURFACE_CLASS}:active {{
    transform: scale(0.98);
  }}

  .content {{
    display: flex;
    align-items: center;
    color: white;
    text-align: center;
    font-family: sans-serif;{content_extra}
  }}
</style>
<div class="{SURFACE_CLASS}">
  <div class="content">
    <slot></slot>
  </div>
</div>
"#
    )
}
