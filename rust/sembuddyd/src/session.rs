use crate::catalog::INTRO_SLIDES;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Screen {
    Splash,
    Onboarding,
    Registration,
    Dashboard,
    Attendance,
    Marks,
    Syllabus,
    Settings,
    Chat,
}

impl Screen {
    pub fn parse(raw: &str) -> Option<Screen> {
        serde_json::from_value(serde_json::Value::String(raw.trim().to_string())).ok()
    }

    /// Screens that need a registered profile.
    pub fn is_protected(self) -> bool {
        matches!(
            self,
            Screen::Dashboard
                | Screen::Attendance
                | Screen::Marks
                | Screen::Syllabus
                | Screen::Settings
                | Screen::Chat
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    pub from: Screen,
    pub to: Screen,
    pub redirected: bool,
}

/// Where a request for `target` actually lands.
pub fn resolve(target: Screen, has_profile: bool) -> Screen {
    match target {
        Screen::Onboarding if has_profile => Screen::Dashboard,
        t if t.is_protected() && !has_profile => Screen::Onboarding,
        t => t,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    screen: Screen,
    slide: usize,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            screen: Screen::Splash,
            slide: 0,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn slide(&self) -> usize {
        self.slide
    }

    fn move_to(&mut self, requested: Screen, has_profile: bool) -> Transition {
        let from = self.screen;
        let to = resolve(requested, has_profile);
        if to == Screen::Onboarding && from != Screen::Onboarding {
            self.slide = 0;
        }
        self.screen = to;
        Transition {
            from,
            to,
            redirected: to != requested,
        }
    }

    pub fn goto(&mut self, target: Screen, has_profile: bool) -> Transition {
        self.move_to(target, has_profile)
    }

    pub fn splash_complete(&mut self, has_profile: bool) -> Transition {
        let next = if has_profile {
            Screen::Dashboard
        } else {
            Screen::Onboarding
        };
        self.move_to(next, has_profile)
    }

    /// Advance the intro slides; the last slide leads to registration.
    pub fn onboarding_next(&mut self, has_profile: bool) -> Transition {
        if self.screen != Screen::Onboarding {
            return self.move_to(Screen::Onboarding, has_profile);
        }
        if self.slide + 1 < INTRO_SLIDES.len() {
            self.slide += 1;
            return Transition {
                from: Screen::Onboarding,
                to: Screen::Onboarding,
                redirected: false,
            };
        }
        self.move_to(Screen::Registration, has_profile)
    }

    pub fn registered(&mut self) -> Transition {
        self.move_to(Screen::Dashboard, true)
    }

    pub fn reset(&mut self) -> Transition {
        let from = self.screen;
        *self = Self::new();
        Transition {
            from,
            to: Screen::Splash,
            redirected: false,
        }
    }
}
