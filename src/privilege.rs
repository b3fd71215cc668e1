use std::io;

/// Lowers any elevated privilege the binary was installed with.
pub trait Privileges {
    fn lower(&self) -> io::Result<()>;
}

/// Drops a setgid-granted effective group back to the caller's real group.
#[cfg(unix)]
pub struct SetgidPrivileges;

#[cfg(unix)]
impl Privileges for SetgidPrivileges {
    fn lower(&self) -> io::Result<()> {
        // SAFETY: getgid and setregid only read and update process credentials.
        let res = unsafe {
            let gid = libc::getgid();
            libc::setregid(gid, gid)
        };
        if res != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}

#[cfg(any(not(unix), test))]
pub struct NoPrivileges;

#[cfg(any(not(unix), test))]
impl Privileges for NoPrivileges {
    fn lower(&self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(unix)]
pub fn platform() -> impl Privileges {
    SetgidPrivileges
}

#[cfg(not(unix))]
pub fn platform() -> impl Privileges {
    NoPrivileges
}
