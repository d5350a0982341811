use super::*;

impl OfficeService {
    /// Creates an office and its creator member.
    ///
    /// The creator always receives `#00001`. Join codes are redrawn on
    /// collision until the configured attempt budget is spent.
    pub async fn create_office(
        &self,
        name: &str,
        creator_name: &str,
        description: Option<String>,
    ) -> AppResult<(Office, Member)> {
        let office_name = NonEmptyString::for_field("office name", name)?;
        let creator_name = NonEmptyString::for_field("creator name", creator_name)?;
        let max_attempts = self.config.join_code_max_attempts;

        let _registry = self.locks.lock_registry().await;
        for attempt in 1..=max_attempts {
            let join_code = self.join_codes.generate()?;
            if self.repository.join_code_in_use(&join_code).await? {
                warn!(attempt, join_code = %join_code, "join code collision, drawing another");
                continue;
            }

            let now = Utc::now();
            let office = Office::new(
                office_name.as_str(),
                description.clone(),
                join_code,
                now,
            )?;
            let creator = Member::creator(office.id(), creator_name.as_str(), now)?;

            match self
                .repository
                .create_office(office.clone(), creator.clone(), RoleDefinition::defaults())
                .await
            {
                Ok(()) => {}
                Err(AppError::Conflict(message)) => {
                    warn!(attempt, %message, "join code taken at commit, drawing another");
                    continue;
                }
                Err(error) => return Err(error),
            }

            self.record(
                office.id(),
                Some(creator.id()),
                ActivityAction::OfficeCreated,
                "office",
                office.id().to_string(),
                format!("created office '{}'", office.name()),
            )
            .await;

            info!(
                office_id = %office.id(),
                join_code = %office.join_code(),
                creator = %creator.name(),
                "office created"
            );
            return Ok((office, creator));
        }

        warn!(max_attempts, "join code generation exhausted");
        Err(AppError::CodeExhausted(format!(
            "no unused join code found after {max_attempts} attempts"
        )))
    }

    /// Adds a member to the office owning `join_code`.
    ///
    /// Employee numbers are assigned under the office lock, so concurrent
    /// joins receive distinct, increasing numbers.
    pub async fn join_office(&self, join_code: &str, member_name: &str) -> AppResult<Member> {
        let join_code = JoinCode::parse(join_code)?;
        let member_name = NonEmptyString::for_field("member name", member_name)?;

        let office = self
            .repository
            .find_office_by_join_code(&join_code)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("office not found: no office uses join code '{join_code}'"))
            })?;

        let _guard = self.locks.lock(office.id()).await;
        let existing = self.repository.count_members(office.id()).await?;
        let employee_number = EmployeeNumber::after_member_count(existing)?;
        let member = Member::joiner(office.id(), member_name.as_str(), employee_number, Utc::now())?;

        self.repository.insert_member(member.clone()).await?;
        self.record(
            office.id(),
            Some(member.id()),
            ActivityAction::MemberJoined,
            "member",
            member.id().to_string(),
            format!("'{}' joined as {}", member.name(), member.employee_number()),
        )
        .await;

        info!(
            office_id = %office.id(),
            employee_number = %member.employee_number(),
            "member joined office"
        );
        Ok(member)
    }

    /// Returns one office.
    pub async fn find_office(&self, office_id: OfficeId) -> AppResult<Office> {
        self.require_office(office_id).await
    }

    /// Renames an office or changes its description.
    pub async fn update_office_details(
        &self,
        actor: &MemberIdentity,
        name: &str,
        description: Option<String>,
    ) -> AppResult<Office> {
        let _guard = self.locks.lock(actor.office_id()).await;
        let mut office = self.require_office(actor.office_id()).await?;
        office.update_details(name, description)?;

        self.repository.save_office(office.clone()).await?;
        self.record(
            office.id(),
            Some(actor.member_id()),
            ActivityAction::OfficeUpdated,
            "office",
            office.id().to_string(),
            format!("updated office details, name '{}'", office.name()),
        )
        .await;

        Ok(office)
    }
}
