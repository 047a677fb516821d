use serde::{Deserialize, Serialize};

/// One selectable UI skin.
///
/// A flat record the renderer binds to by field name, covering four
/// regions: the app frame, the result container and its items, the query
/// box, and the action panel. Every field is required; partial themes are
/// rejected at load time. Geometry is `u32` so a validated theme cannot
/// carry a negative padding or radius. The wire shape keeps the PascalCase
/// names theme files have always used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ThemeDefinition {
    pub theme_id: String,
    pub theme_name: String,
    pub theme_author: String,
    pub theme_url: String,

    pub app_background_color: String,
    pub app_padding_left: u32,
    pub app_padding_top: u32,
    pub app_padding_right: u32,
    pub app_padding_bottom: u32,

    pub result_container_padding_left: u32,
    pub result_container_padding_top: u32,
    pub result_container_padding_right: u32,
    pub result_container_padding_bottom: u32,
    pub result_item_border_radius: u32,
    pub result_item_padding_left: u32,
    pub result_item_padding_top: u32,
    pub result_item_padding_right: u32,
    pub result_item_padding_bottom: u32,
    pub result_item_active_background_color: String,

    pub query_box_font_color: String,
    pub query_box_background_color: String,
    pub query_box_border_radius: u32,

    pub action_container_background_color: String,
    pub action_container_header_font_color: String,
    pub action_container_padding_left: u32,
    pub action_container_padding_top: u32,
    pub action_container_padding_right: u32,
    pub action_container_padding_bottom: u32,
    pub action_item_active_background_color: String,
    pub action_query_box_font_color: String,
    pub action_query_box_background_color: String,
    pub action_query_box_border_radius: u32,
}

impl ThemeDefinition {
    /// Every color-valued field with its wire name, for load-time checks.
    pub(crate) fn color_fields(&self) -> [(&'static str, &str); 9] {
        [
            ("AppBackgroundColor", &self.app_background_color),
            (
                "ResultItemActiveBackgroundColor",
                &self.result_item_active_background_color,
            ),
            ("QueryBoxFontColor", &self.query_box_font_color),
            ("QueryBoxBackgroundColor", &self.query_box_background_color),
            (
                "ActionContainerBackgroundColor",
                &self.action_container_background_color,
            ),
            (
                "ActionContainerHeaderFontColor",
                &self.action_container_header_font_color,
            ),
            (
                "ActionItemActiveBackgroundColor",
                &self.action_item_active_background_color,
            ),
            ("ActionQueryBoxFontColor", &self.action_query_box_font_color),
            (
                "ActionQueryBoxBackgroundColor",
                &self.action_query_box_background_color,
            ),
        ]
    }
}
