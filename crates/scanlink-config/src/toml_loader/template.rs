//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# scanlink configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[server]
# url = "http://localhost:5000"   # http, https, ws or wss
# namespace = "/"
# path = "socket.io"
# connect_timeout_secs = 15       # 1-120
# reconnect_delay_secs = 1        # 1-60
# max_reconnect_delay_secs = 30   # 1-600

[scanner]
# facing_mode = "environment"     # environment, user
# fps = 10                        # 1-60
# scan_box_width = 250            # 50-2000
# scan_box_height = 150           # 50-2000
# aspect_ratio = 1.0              # 0.25-4.0
# vibrate_ms = 200                # 0-2000, 0 disables
# flash_ms = 500                  # 0-10000

[notifications]
# dismiss_after_ms = 3000         # 500-60000
# capacity = 16                   # 1-64

[signature]
# height = 150                    # 50-1000
# line_width = 2.0                # 0.5-20.0
# stroke_color = "#000"

[logging]
# level = "info"                  # trace, debug, info, warn, error
"##
}
