//! Tier classification engine -- pure logic, no database access.
//!
//! Rules are evaluated in strict descending-tier order (4 -> 3 -> 2 -> 1 -> 0)
//! and the first matching predicate wins. There is no scoring or partial
//! credit; tier 0 is the unconditional fallback. The function is total over
//! well-formed [`AssessmentAnswers`] and never produces tier 5 (reserved for
//! manual elevation).

use super::answers::{AssessmentAnswers, ExperienceLevel};
use super::tier::SkillTier;

/// Classify a candidate's answers into a skill tier.
///
/// Deterministic and side-effect free; safe to call concurrently. The
/// assigned tier is computed exactly once at registration and persisted --
/// callers must not re-run classification after edits to personal info.
pub fn classify(answers: &AssessmentAnswers) -> SkillTier {
    if qualifies_tier_4(answers) {
        return SkillTier::Tier4;
    }
    if qualifies_tier_3(answers) {
        return SkillTier::Tier3;
    }
    if qualifies_tier_2(answers) {
        return SkillTier::Tier2;
    }
    if qualifies_tier_1(answers) {
        return SkillTier::Tier1;
    }
    SkillTier::Tier0
}

/// Tier 4 (Advanced Full-Stack): frontend framework at intermediate via
/// React/Next.js or Laravel, a backend framework at basic, and working Go.
fn qualifies_tier_4(a: &AssessmentAnswers) -> bool {
    use ExperienceLevel::{Basic, Intermediate};

    (a.react_next_js_knowledge.meets(Intermediate) || a.laravel_knowledge.meets(Intermediate))
        && (a.express_hono_knowledge.meets(Basic) || a.laravel_knowledge.meets(Basic))
        && a.golang_knowledge.meets(Basic)
        && a.can_build_go_api
}

/// Tier 3 (Multi-Framework): no Golang at all, plus either the
/// Next.js + Express/Hono path or the Laravel path. Any Golang knowledge
/// disqualifies -- such a candidate either made tier 4 or falls to tier <= 2.
fn qualifies_tier_3(a: &AssessmentAnswers) -> bool {
    use ExperienceLevel::{Basic, Intermediate, None};

    if a.golang_knowledge != None {
        return false;
    }

    let next_express_path = a.react_next_js_knowledge.meets(Intermediate)
        && a.can_build_crud_app
        && a.can_implement_auth
        && a.express_hono_knowledge.meets(Basic)
        && a.can_build_authenticated_api;

    let laravel_path =
        a.laravel_knowledge.meets(Intermediate) && a.can_build_crud_app && a.can_implement_auth;

    next_express_path || laravel_path
}

/// Tier 2 (Full-Stack Next.js): full authenticated Next.js stack with
/// deployment, and no backend-framework knowledge beyond basic Express/Hono.
/// Candidates with any Laravel or with Express/Hono above basic are excluded
/// here; the rule set expects them to qualify for tier 3 instead.
fn qualifies_tier_2(a: &AssessmentAnswers) -> bool {
    use ExperienceLevel::{Basic, Intermediate, None};

    a.react_next_js_knowledge.meets(Intermediate)
        && a.can_build_crud_app
        && a.can_implement_auth
        && a.can_implement_google_auth
        && a.can_deploy_apps
        && (a.express_hono_knowledge == Basic || a.express_hono_knowledge == None)
        && a.laravel_knowledge == None
}

/// Tier 1 (CRUD Developer): can build a CRUD app with a database but
/// explicitly cannot implement authentication.
fn qualifies_tier_1(a: &AssessmentAnswers) -> bool {
    use ExperienceLevel::Basic;

    a.react_next_js_knowledge.meets(Basic)
        && a.can_build_crud_app
        && a.database_knowledge.meets(Basic)
        && !a.can_implement_auth
}

#[cfg(test)]
mod tests {
    use super::*;
    use ExperienceLevel::{Advanced, Basic, Intermediate, None};

    /// Baseline answer set: every level `none`, every capability `false`.
    fn blank() -> AssessmentAnswers {
        AssessmentAnswers {
            html_css_js_knowledge: None,
            react_next_js_knowledge: None,
            can_build_crud_app: false,
            can_implement_auth: false,
            can_implement_google_auth: false,
            database_knowledge: None,
            express_hono_knowledge: None,
            can_build_authenticated_api: false,
            can_document_api: false,
            laravel_knowledge: None,
            golang_knowledge: None,
            can_build_go_api: false,
            can_deploy_apps: false,
        }
    }

    /// Every level `advanced`, every capability `true`.
    fn maximal() -> AssessmentAnswers {
        AssessmentAnswers {
            html_css_js_knowledge: Advanced,
            react_next_js_knowledge: Advanced,
            can_build_crud_app: true,
            can_implement_auth: true,
            can_implement_google_auth: true,
            database_knowledge: Advanced,
            express_hono_knowledge: Advanced,
            can_build_authenticated_api: true,
            can_document_api: true,
            laravel_knowledge: Advanced,
            golang_knowledge: Advanced,
            can_build_go_api: true,
            can_deploy_apps: true,
        }
    }

    // -- Fallback and dominance properties --------------------------------

    #[test]
    fn test_all_none_classifies_as_tier_0() {
        assert_eq!(classify(&blank()), SkillTier::Tier0);
    }

    #[test]
    fn test_universal_yes_classifies_as_tier_4() {
        // The maximal candidate trivially satisfies the tier 4 predicate,
        // and evaluation order guarantees tier 4 wins first.
        assert_eq!(classify(&maximal()), SkillTier::Tier4);
    }

    #[test]
    fn test_never_produces_tier_5_and_is_deterministic() {
        let samples = [blank(), maximal()];
        for answers in samples {
            let first = classify(&answers);
            assert!(first <= SkillTier::Tier4, "classify must never return tier 5");
            assert_eq!(classify(&answers), first, "repeated calls must agree");
        }
    }

    // -- Literal scenarios from the tier rule definitions ------------------

    #[test]
    fn test_scenario_basics_without_crud_is_tier_0() {
        let answers = AssessmentAnswers {
            html_css_js_knowledge: Basic,
            react_next_js_knowledge: Basic,
            ..blank()
        };
        assert_eq!(classify(&answers), SkillTier::Tier0);
    }

    #[test]
    fn test_scenario_crud_without_auth_is_tier_1() {
        let answers = AssessmentAnswers {
            react_next_js_knowledge: Intermediate,
            can_build_crud_app: true,
            database_knowledge: Basic,
            can_implement_auth: false,
            ..blank()
        };
        assert_eq!(classify(&answers), SkillTier::Tier1);
    }

    #[test]
    fn test_scenario_full_nextjs_stack_is_tier_2() {
        let answers = AssessmentAnswers {
            react_next_js_knowledge: Intermediate,
            can_build_crud_app: true,
            can_implement_auth: true,
            can_implement_google_auth: true,
            can_deploy_apps: true,
            ..blank()
        };
        assert_eq!(classify(&answers), SkillTier::Tier2);
    }

    #[test]
    fn test_scenario_next_plus_express_is_tier_3() {
        let answers = AssessmentAnswers {
            react_next_js_knowledge: Intermediate,
            can_build_crud_app: true,
            can_implement_auth: true,
            express_hono_knowledge: Intermediate,
            can_build_authenticated_api: true,
            ..blank()
        };
        assert_eq!(classify(&answers), SkillTier::Tier3);
    }

    #[test]
    fn test_scenario_laravel_path_is_tier_3() {
        let answers = AssessmentAnswers {
            laravel_knowledge: Intermediate,
            can_build_crud_app: true,
            can_implement_auth: true,
            ..blank()
        };
        assert_eq!(classify(&answers), SkillTier::Tier3);
    }

    #[test]
    fn test_scenario_golang_stack_is_tier_4() {
        let answers = AssessmentAnswers {
            react_next_js_knowledge: Intermediate,
            express_hono_knowledge: Intermediate,
            golang_knowledge: Basic,
            can_build_go_api: true,
            ..blank()
        };
        assert_eq!(classify(&answers), SkillTier::Tier4);
    }

    // -- Rule-ordering edge cases -----------------------------------------

    #[test]
    fn test_go_without_frontend_falls_through_tier_4() {
        // Satisfies the Go requirement but fails the React/Laravel clause:
        // rule ordering sends this candidate down the chain, not into tier 4.
        let answers = AssessmentAnswers {
            express_hono_knowledge: Advanced,
            golang_knowledge: Advanced,
            can_build_go_api: true,
            ..blank()
        };
        assert_eq!(classify(&answers), SkillTier::Tier0);
    }

    #[test]
    fn test_go_without_can_build_go_api_is_not_tier_4() {
        let answers = AssessmentAnswers {
            react_next_js_knowledge: Intermediate,
            express_hono_knowledge: Intermediate,
            golang_knowledge: Basic,
            can_build_go_api: false,
            ..blank()
        };
        assert_ne!(classify(&answers), SkillTier::Tier4);
    }

    #[test]
    fn test_any_golang_knowledge_blocks_tier_3() {
        // Otherwise a perfect tier 3 (option A) candidate, but knows a
        // little Go and cannot build a Go API: neither tier 4 nor tier 3.
        let answers = AssessmentAnswers {
            react_next_js_knowledge: Intermediate,
            can_build_crud_app: true,
            can_implement_auth: true,
            express_hono_knowledge: Basic,
            can_build_authenticated_api: true,
            golang_knowledge: Basic,
            ..blank()
        };
        let tier = classify(&answers);
        assert_ne!(tier, SkillTier::Tier3);
        assert_ne!(tier, SkillTier::Tier4);
    }

    #[test]
    fn test_laravel_knowledge_excludes_tier_2() {
        // Full Next.js stack, but with basic Laravel: excluded from tier 2
        // by design (the rules assume a tier 3 qualification instead).
        let answers = AssessmentAnswers {
            react_next_js_knowledge: Intermediate,
            can_build_crud_app: true,
            can_implement_auth: true,
            can_implement_google_auth: true,
            can_deploy_apps: true,
            laravel_knowledge: Basic,
            ..blank()
        };
        assert_ne!(classify(&answers), SkillTier::Tier2);
    }

    #[test]
    fn test_express_above_basic_excludes_tier_2() {
        let mut answers = AssessmentAnswers {
            react_next_js_knowledge: Intermediate,
            can_build_crud_app: true,
            can_implement_auth: true,
            can_implement_google_auth: true,
            can_deploy_apps: true,
            ..blank()
        };

        // Basic Express/Hono is still tier 2...
        answers.express_hono_knowledge = Basic;
        assert_eq!(classify(&answers), SkillTier::Tier2);

        // ...but intermediate is not. Without the authenticated-API
        // capability this candidate misses tier 3 as well and lands at 0
        // (tier 1 requires auth to be explicitly absent).
        answers.express_hono_knowledge = Intermediate;
        assert_eq!(classify(&answers), SkillTier::Tier0);
    }

    #[test]
    fn test_tier_2_requires_both_google_auth_and_deployment() {
        let base = AssessmentAnswers {
            react_next_js_knowledge: Intermediate,
            can_build_crud_app: true,
            can_implement_auth: true,
            ..blank()
        };

        let missing_google = AssessmentAnswers {
            can_deploy_apps: true,
            ..base
        };
        assert_ne!(classify(&missing_google), SkillTier::Tier2);

        let missing_deploy = AssessmentAnswers {
            can_implement_google_auth: true,
            ..base
        };
        assert_ne!(classify(&missing_deploy), SkillTier::Tier2);
    }

    #[test]
    fn test_tier_1_requires_auth_to_be_false() {
        let answers = AssessmentAnswers {
            react_next_js_knowledge: Basic,
            can_build_crud_app: true,
            database_knowledge: Basic,
            can_implement_auth: true,
            ..blank()
        };
        // Auth capability without the rest of the tier 2/3 requirements
        // falls all the way down to tier 0.
        assert_eq!(classify(&answers), SkillTier::Tier0);
    }

    #[test]
    fn test_tier_1_requires_database_knowledge() {
        let answers = AssessmentAnswers {
            react_next_js_knowledge: Basic,
            can_build_crud_app: true,
            database_knowledge: None,
            ..blank()
        };
        assert_eq!(classify(&answers), SkillTier::Tier0);
    }

    #[test]
    fn test_tier_4_laravel_only_path() {
        // Laravel can satisfy both the frontend and backend clauses of
        // tier 4 on its own.
        let answers = AssessmentAnswers {
            laravel_knowledge: Intermediate,
            golang_knowledge: Basic,
            can_build_go_api: true,
            ..blank()
        };
        assert_eq!(classify(&answers), SkillTier::Tier4);
    }
}
