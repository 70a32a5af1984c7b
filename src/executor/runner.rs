//! Scenario execution
//!
//! Drives the fixed 13-step scenario against one backend, strictly
//! sequentially. The only control flow beyond the fixed order is the abort
//! when session creation fails and the skip of card-dependent steps when
//! no search yielded a card.

use anyhow::Result;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::ProbeConfig;
use crate::http::ApiClient;
use crate::models::{TestCase, TestResult, TestRunSummary, TestUser};
use crate::output::ResultFormatter;
use crate::scenario::{
    AddToCollectionProbe, AuthenticatedAccessProbe, CardDetailProbe, CardSearchProbe,
    CreateSessionProbe, ListCollectionProbe, LogoutProbe, MembershipCheckProbe,
    RemoveFromCollectionProbe, TestContext, UnauthenticatedAccessProbe,
};

/// Sequential runner for the probe scenario
pub struct ScenarioRunner {
    config: ProbeConfig,
    client: ApiClient,
    formatter: ResultFormatter,
}

impl ScenarioRunner {
    pub fn new(config: ProbeConfig, formatter: ResultFormatter) -> Result<Self> {
        let client = ApiClient::new(&config.base_url, config.timeout_secs)?;
        Ok(Self {
            config,
            client,
            formatter,
        })
    }

    /// Print the step's line immediately and append it to the context
    fn report(&self, ctx: &mut TestContext, result: TestResult) {
        println!("{}", self.formatter.format_result(&result));
        ctx.record(result);
    }

    /// Run the whole scenario and compute the summary
    pub async fn run(&self) -> Result<TestRunSummary> {
        info!("Starting backend probe against {}", self.config.base_url);
        let start = Instant::now();

        let mut ctx = TestContext::new(TestUser::generate());

        // Step 1: identity endpoint must reject us before login
        let result = UnauthenticatedAccessProbe.run(&self.client).await;
        self.report(&mut ctx, result);

        // Step 2: session creation is a prerequisite for the rest
        let (result, session) = CreateSessionProbe::new(ctx.user.clone())
            .run(&self.client)
            .await;
        self.report(&mut ctx, result);

        ctx.session = session;
        let Some(session) = ctx.session.clone() else {
            println!("Cannot continue without a valid session");
            return Ok(ctx.into_summary(&self.config.base_url));
        };

        // Step 3: the session must map back to our identity
        let result = AuthenticatedAccessProbe::new(&ctx.user.email)
            .run(&self.client, &session)
            .await;
        self.report(&mut ctx, result);

        // Steps 4-6: searches; the first search's first hit feeds the
        // card-dependent block
        let (result, card) = CardSearchProbe::new(
            TestCase::SearchLightningBolt,
            "lightning bolt",
            self.config.search_timeout_secs,
        )
        .expect_name("lightning bolt")
        .run(&self.client)
        .await;
        self.report(&mut ctx, result);
        ctx.card = card;

        let (result, _) = CardSearchProbe::new(
            TestCase::SearchBlackLotus,
            "black lotus",
            self.config.search_timeout_secs,
        )
        .expect_name("black lotus")
        .run(&self.client)
        .await;
        self.report(&mut ctx, result);

        let (result, _) = CardSearchProbe::new(
            TestCase::SearchColorRed,
            "color:red",
            self.config.search_timeout_secs,
        )
        .expect_color("R")
        .run(&self.client)
        .await;
        self.report(&mut ctx, result);

        // Steps 7-12 need a captured card
        if let Some(card) = ctx.card.clone() {
            let result = CardDetailProbe::new(&card.id, self.config.search_timeout_secs)
                .run(&self.client)
                .await;
            self.report(&mut ctx, result);

            let result = AddToCollectionProbe::new(card.clone())
                .run(&self.client, &session)
                .await;
            self.report(&mut ctx, result);

            let (result, _collection) = ListCollectionProbe.run(&self.client, &session).await;
            self.report(&mut ctx, result);

            let (result, _present) = MembershipCheckProbe::new(TestCase::MembershipCheck, &card.id)
                .run(&self.client, &session)
                .await;
            self.report(&mut ctx, result);

            let result = RemoveFromCollectionProbe::new(&card.id)
                .run(&self.client, &session)
                .await;
            self.report(&mut ctx, result);

            // Give the backend a moment before confirming the removal
            sleep(Duration::from_secs(self.config.removal_delay_secs)).await;

            let (result, still_present) =
                MembershipCheckProbe::new(TestCase::RemovalConfirmation, &card.id)
                    .expect_absent(self.config.strict_removal)
                    .run(&self.client, &session)
                    .await;
            self.report(&mut ctx, result);

            if !self.config.strict_removal && still_present == Some(true) {
                warn!("card still reported in collection after removal");
            }
        } else {
            warn!("no card captured from search, skipping card detail and collection steps");
        }

        // Step 13: end the session
        let result = LogoutProbe.run(&self.client, &session).await;
        self.report(&mut ctx, result);

        let summary = ctx.into_summary(&self.config.base_url);
        info!(
            "Scenario completed in {}ms - Pass: {}/{} ({:.1}%)",
            start.elapsed().as_millis(),
            summary.passed,
            summary.total,
            summary.pass_rate()
        );

        Ok(summary)
    }
}
