mod update_site_settings;

pub use update_site_settings::UpdateSiteSettingsUseCase;
