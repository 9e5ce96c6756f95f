use std::collections::BTreeMap;

/// Numeric steps of a generated color scale.
pub const SCALE_STEPS: [u16; 11] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 950];

/// Named color accessors that resolve to CSS variable references.
///
/// Nothing here holds a concrete color: `primary_color()` is
/// `rgb(var(--primary))`. A preset built from these strings follows theme
/// switches without being rebuilt, since only the variables change.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorAdapter;

impl ColorAdapter {
    /// `rgb(var(--{token}))` for any engine variable.
    pub fn token(&self, token: &str) -> String {
        format!("rgb(var(--{token}))")
    }

    /// `rgb(var(--{token}) / {alpha})`.
    pub fn token_alpha(&self, token: &str, alpha: f32) -> String {
        format!("rgb(var(--{token}) / {alpha})")
    }

    pub fn primary_color(&self) -> String {
        self.token("primary")
    }

    pub fn primary_hover_color(&self) -> String {
        self.token("primary-hover")
    }

    pub fn primary_foreground(&self) -> String {
        self.token("primary-foreground")
    }

    pub fn primary_light(&self) -> String {
        self.token("primary-light")
    }

    pub fn primary_light_foreground(&self) -> String {
        self.token("primary-light-foreground")
    }

    pub fn accent_color(&self) -> String {
        self.token("accent")
    }

    pub fn background_color(&self) -> String {
        self.token("background")
    }

    pub fn foreground_color(&self) -> String {
        self.token("foreground")
    }

    pub fn card_color(&self) -> String {
        self.token("card")
    }

    pub fn card_foreground(&self) -> String {
        self.token("card-foreground")
    }

    pub fn muted_foreground(&self) -> String {
        self.token("muted-foreground")
    }

    pub fn border_color(&self) -> String {
        self.token("border")
    }

    pub fn ring_color(&self) -> String {
        self.token("ring")
    }

    /// Background shifted toward the foreground by `step / 10` percent
    /// (`0` is the plain background, `950` is 95% foreground).
    pub fn surface(&self, step: u16) -> String {
        if step == 0 {
            return self.background_color();
        }
        format!(
            "color-mix(in srgb, {} {}%, {})",
            self.foreground_color(),
            percent(f64::from(step) / 10.0),
            self.background_color()
        )
    }

    pub fn bg_100(&self) -> String {
        self.surface(100)
    }

    pub fn bg_200(&self) -> String {
        self.surface(200)
    }

    /// Surface scale `0, 50, ..., 950`.
    pub fn surface_scale(&self) -> BTreeMap<u16, String> {
        std::iter::once(0)
            .chain(SCALE_STEPS)
            .map(|step| (step, self.surface(step)))
            .collect()
    }

    /// A 50–950 scale for an interactive family.
    ///
    /// `500` is the base variable and `600` the hover variable. Lighter steps
    /// mix the base with white and darker steps mix the hover color with
    /// black, all inside `color-mix()` so the browser does the math.
    pub fn color_scale(&self, family: &str) -> BTreeMap<u16, String> {
        let base = self.token(family);
        let hover = self.token(&format!("{family}-hover"));
        SCALE_STEPS
            .iter()
            .map(|&step| {
                let value = match step {
                    500 => base.clone(),
                    600 => hover.clone(),
                    s if s < 500 => {
                        let share = base_share_light(s);
                        format!("color-mix(in srgb, {base} {}%, white)", percent(share))
                    }
                    s => {
                        let share = hover_share_dark(s);
                        format!("color-mix(in srgb, {hover} {}%, black)", percent(share))
                    }
                };
                (step, value)
            })
            .collect()
    }
}

/// Share of the base color in a step lighter than 500.
fn base_share_light(step: u16) -> f64 {
    match step {
        50 => 10.0,
        100 => 20.0,
        200 => 40.0,
        300 => 60.0,
        _ => 80.0,
    }
}

/// Share of the hover color in a step darker than 600.
fn hover_share_dark(step: u16) -> f64 {
    match step {
        700 => 80.0,
        800 => 60.0,
        900 => 40.0,
        _ => 25.0,
    }
}

fn percent(value: f64) -> String {
    let formatted = format!("{value:.2}");
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
