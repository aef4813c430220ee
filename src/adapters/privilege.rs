use crate::domain::ports::PrivilegeCheck;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Administrator on Windows, root elsewhere.
#[derive(Debug, Clone, Default)]
pub struct SystemPrivilege;

#[cfg(windows)]
#[async_trait]
impl PrivilegeCheck for SystemPrivilege {
    async fn is_elevated(&self) -> Result<bool> {
        use crate::adapters::scheduler::{run_powershell, DEFAULT_POWERSHELL};

        let script = "([Security.Principal.WindowsPrincipal][Security.Principal.WindowsIdentity]::GetCurrent()).IsInRole([Security.Principal.WindowsBuiltInRole]::Administrator)";
        let out = run_powershell(DEFAULT_POWERSHELL, "privilege check", script).await?;
        Ok(out.trim().eq_ignore_ascii_case("true"))
    }
}

#[cfg(not(windows))]
#[async_trait]
impl PrivilegeCheck for SystemPrivilege {
    async fn is_elevated(&self) -> Result<bool> {
        let output = tokio::process::Command::new("id").arg("-u").output().await?;
        if !output.status.success() {
            tracing::warn!("⚠️ `id -u` failed, assuming no elevation");
            return Ok(false);
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim() == "0")
    }
}
