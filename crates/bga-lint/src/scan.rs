//! Cross-file scanners for action calls and notifications
//!
//! These look at the front-end script and the server scripts rather than the
//! state definitions. All results are deduplicated and keep discovery order.

use crate::model::{normalize_action, push_unique};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

// Front end: action invocations
static PERFORM_ACTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"bgaPerformAction\s*\(\s*['"](\w+)['"]"#).expect("valid regex")
});
static AJAX_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\w+/\w+/(\w+)\.html").expect("valid regex"));

// Front end: notification handlers
static PROMISE_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)bgaSetupPromiseNotifications\s*\(\s*\{(.*?)\}\s*\)").expect("valid regex")
});
static OBJECT_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"['"]?(\w+)['"]?\s*:"#).expect("valid regex"));
static SUBSCRIBE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"notifqueue\.subscribe\s*\(\s*['"](\w+)['"]"#).expect("valid regex")
});
static HANDLER_METHOD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bnotif_(\w+)\s*[:(]").expect("valid regex"));

// Server: notification sends
static NOTIFY_ALL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"notify\s*->\s*all\w*\s*\(\s*['"](\w+)['"]"#).expect("valid regex")
});
static NOTIFY_ONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:notify\s*->\s*players?|notifyPlayer)\s*\(\s*[^,()]+,\s*['"](\w+)['"]"#)
        .expect("valid regex")
});
static NOTIFY_LEGACY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"notifyAllPlayers\s*\(\s*['"](\w+)['"]"#).expect("valid regex")
});

// Server: main logic
static FUNCTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"function\s+(\w+)\s*\(([^)]*)\)").expect("valid regex"));
static CHECK_ACTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:self::|\$this\s*->\s*)checkAction\s*\(").expect("valid regex")
});
static PROGRESSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"function\s+getGameProgression\s*\([^)]*\)[^{]*\{\s*(?://[^\n]*\s*)*return\s+([^;]+);",
    )
    .expect("valid regex")
});

fn collect(re: &Regex, text: &str, out: &mut Vec<String>) {
    for caps in re.captures_iter(text) {
        push_unique(out, caps[1].to_string());
    }
}

/// Action names the front end invokes, as written
#[must_use]
pub fn front_end_actions(js: &str) -> Vec<String> {
    let mut names = Vec::new();
    collect(&PERFORM_ACTION_RE, js, &mut names);
    collect(&AJAX_URL_RE, js, &mut names);
    names
}

/// Notification names the front end registers a handler for
#[must_use]
pub fn notification_handlers(js: &str) -> Vec<String> {
    let mut names = Vec::new();
    if let Some(block) = PROMISE_BLOCK_RE.captures(js).and_then(|c| c.get(1)) {
        collect(&OBJECT_KEY_RE, block.as_str(), &mut names);
    }
    collect(&SUBSCRIBE_RE, js, &mut names);
    collect(&HANDLER_METHOD_RE, js, &mut names);
    names
}

/// Notification names a server script sends
#[must_use]
pub fn sent_notifications(php: &str) -> Vec<String> {
    let mut hits: Vec<(usize, &str)> = [&*NOTIFY_ALL_RE, &*NOTIFY_ONE_RE, &*NOTIFY_LEGACY_RE]
        .into_iter()
        .flat_map(|re| re.captures_iter(php))
        .filter_map(|caps| caps.get(1).map(|m| (m.start(), m.as_str())))
        .collect();
    hits.sort_by_key(|(start, _)| *start);

    let mut names = Vec::new();
    for (_, name) in hits {
        push_unique(&mut names, name.to_string());
    }
    names
}

/// A player action found in the main logic file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerAction {
    /// Function name as declared
    pub name: String,
    /// Raw parameter list
    pub params: String,
    /// Whether the body calls `checkAction`
    pub guarded: bool,
}

impl PlayerAction {
    /// Canonical action name
    #[must_use]
    pub fn normalized(&self) -> String {
        normalize_action(&self.name)
    }
}

/// Player actions defined in a main logic file.
///
/// A function counts when its name carries the `act` prefix or when its body
/// (up to the next named function) calls `checkAction`.
#[must_use]
pub fn list_player_actions(php: &str) -> Vec<PlayerAction> {
    let headers: Vec<_> = FUNCTION_RE.captures_iter(php).collect();
    let mut actions: Vec<PlayerAction> = Vec::new();

    for (idx, caps) in headers.iter().enumerate() {
        let (Some(whole), Some(name), Some(params)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        let body_end = headers
            .get(idx + 1)
            .and_then(|next| next.get(0))
            .map_or(php.len(), |m| m.start());
        let body = &php[whole.end()..body_end];

        let name = name.as_str();
        let guarded = CHECK_ACTION_RE.is_match(body);
        let prefixed = normalize_action(name) != name;
        if !(guarded || prefixed) || actions.iter().any(|a| a.name == name) {
            continue;
        }
        actions.push(PlayerAction {
            name: name.to_string(),
            params: params.as_str().split_whitespace().collect::<Vec<_>>().join(" "),
            guarded,
        });
    }

    actions
}

/// Whether `getGameProgression()` opens with `return 0;`.
///
/// Only the first statement of the body counts, leading line comments aside.
#[must_use]
pub fn is_progression_stub(php: &str) -> bool {
    PROGRESSION_RE
        .captures(php)
        .is_some_and(|caps| caps[1].trim() == "0")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod front_end_tests {
        use super::*;

        #[test]
        fn test_perform_action_calls() {
            let js = r#"
                onCardClick(id) { this.bgaPerformAction("actPlayCard", { id }); }
                onPass() { this.bgaPerformAction('pass'); this.bgaPerformAction('pass'); }
            "#;
            assert_eq!(front_end_actions(js), vec!["actPlayCard", "pass"]);
        }

        #[test]
        fn test_legacy_ajax_urls() {
            let js = r#"this.ajaxcall("/mygame/mygame/playCard.html", { lock: true }, this, function() {});"#;
            assert_eq!(front_end_actions(js), vec!["playCard"]);
        }

        #[test]
        fn test_promise_notification_block() {
            let js = r#"
                setupNotifications() {
                    this.bgaSetupPromiseNotifications({ cardPlayed: 1, 'scoreChanged': 2 });
                }
            "#;
            assert_eq!(notification_handlers(js), vec!["cardPlayed", "scoreChanged"]);
        }

        #[test]
        fn test_subscribe_and_handler_methods() {
            let js = r#"
                dojo.subscribe('older', this, 'notif_older');
                this.notifqueue.subscribe('cardPlayed', this, 'notif_cardPlayed');
                notif_cardPlayed: function (notif) {},
                async notif_roundEnded(args) {}
            "#;
            assert_eq!(
                notification_handlers(js),
                vec!["cardPlayed", "roundEnded"]
            );
        }
    }

    mod server_tests {
        use super::*;

        #[test]
        fn test_three_send_shapes() {
            let php = r#"
                $this->notify->all("cardPlayed", clienttranslate('${player_name} plays'), []);
                $this->notify->player($playerId, 'privateHand', '', []);
                self::notifyAllPlayers('legacyScore', '', []);
                $this->notifyPlayer($player_id, "legacyPrivate", '', []);
                $this->notify->all('cardPlayed', '', []);
                $this->notify->all('roundEnd', '', []);
            "#;
            assert_eq!(
                sent_notifications(php),
                vec!["cardPlayed", "privateHand", "legacyScore", "legacyPrivate", "roundEnd"]
            );
        }

        #[test]
        fn test_private_arguments_variant() {
            let php = r#"$this->notify->allWithPrivateArguments('dealt', '', []);"#;
            assert_eq!(sent_notifications(php), vec!["dealt"]);
        }

        #[test]
        fn test_list_player_actions() {
            let php = r#"
                function actPlayCard(int $cardId) {
                    $this->gamestate->nextState('next');
                }

                function pass() {
                    self::checkAction('pass');
                }

                function stNextPlayer() {
                    $this->activeNextPlayer();
                }

                public function actionHelper() {}
            "#;
            let actions = list_player_actions(php);
            let names: Vec<&str> = actions.iter().map(|a| a.name.as_str()).collect();
            assert_eq!(names, vec!["actPlayCard", "pass"]);
            assert_eq!(actions[0].params, "int $cardId");
            assert!(!actions[0].guarded);
            assert!(actions[1].guarded);
            assert_eq!(actions[0].normalized(), "playCard");
        }

        #[test]
        fn test_check_action_attributed_to_enclosing_function() {
            let php = "function a() {}\nfunction b() { $this->checkAction('b'); }";
            let names: Vec<String> = list_player_actions(php).into_iter().map(|a| a.name).collect();
            assert_eq!(names, vec!["b"]);
        }

        #[test]
        fn test_progression_stub() {
            assert!(is_progression_stub(
                "public function getGameProgression()\n{\n    // TODO\n    return 0;\n}"
            ));
            assert!(is_progression_stub(
                "public function getGameProgression(): int { return 0; }"
            ));
            assert!(!is_progression_stub(
                "public function getGameProgression() { return 100; }"
            ));
            assert!(!is_progression_stub(
                "public function getGameProgression() { $round = $this->getRound(); return $round * 10; }"
            ));
            assert!(!is_progression_stub("function other() { return 0; }"));
            assert!(is_progression_stub(
                "function getGameProgression() { return 0 ; }"
            ));
        }

        #[test]
        fn test_progression_first_return_only() {
            assert!(!is_progression_stub(
                "function getGameProgression() { return $this->computeProgress(); }\nfunction helper() { return 0; }"
            ));
            assert!(!is_progression_stub(
                "function getGameProgression() { $p = $this->round(); if ($p < 0) return 0; return $p; }"
            ));
        }
    }
}
