// src/lint.rs
//! Post-build lint checks over an installed package.
//!
//! Every check is independent: they run concurrently, report through a
//! [`ConsoleHandle`], and the runner counts problems only after all of them
//! have finished.

use crate::console::{Color, ConsoleHandle, Message};
use crate::{Optional, OptionalRef};
use std::collections::HashMap;
use std::iter::Sum;
use std::thread;

/// Outcome of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LintStatus {
    Success = 0,
    ProblemDetected = 1,
}

impl Sum<LintStatus> for usize {
    fn sum<I: Iterator<Item = LintStatus>>(statuses: I) -> usize {
        statuses.map(|status| status as usize).sum()
    }
}

/// Port-level switches that relax or disable checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildPolicy {
    EmptyPackage,
    CmakeHelperPort,
    AllowRestrictedHeaders,
}

impl BuildPolicy {
    pub const ALL: [BuildPolicy; 3] = [
        BuildPolicy::EmptyPackage,
        BuildPolicy::CmakeHelperPort,
        BuildPolicy::AllowRestrictedHeaders,
    ];

    /// Name of the CMake variable a port sets to enable the policy.
    pub fn cmake_variable(self) -> &'static str {
        match self {
            BuildPolicy::EmptyPackage => "VCPKG_POLICY_EMPTY_PACKAGE",
            BuildPolicy::CmakeHelperPort => "VCPKG_POLICY_CMAKE_HELPER_PORT",
            BuildPolicy::AllowRestrictedHeaders => "VCPKG_POLICY_ALLOW_RESTRICTED_HEADERS",
        }
    }

    /// Key used for the policy in lint configuration files.
    pub fn config_key(self) -> &'static str {
        match self {
            BuildPolicy::EmptyPackage => "empty-package",
            BuildPolicy::CmakeHelperPort => "cmake-helper-port",
            BuildPolicy::AllowRestrictedHeaders => "allow-restricted-headers",
        }
    }

    pub fn from_config_key(key: &str) -> Optional<BuildPolicy> {
        BuildPolicy::ALL
            .into_iter()
            .find(|policy| policy.config_key() == key)
            .into()
    }
}

/// Policy settings for one port. A policy nobody set is absent, not `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildPolicies {
    values: HashMap<BuildPolicy, bool>,
}

impl BuildPolicies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, policy: BuildPolicy, enabled: bool) -> Self {
        self.set(policy, enabled);
        self
    }

    pub fn set(&mut self, policy: BuildPolicy, enabled: bool) {
        self.values.insert(policy, enabled);
    }

    pub fn get(&self, policy: BuildPolicy) -> Optional<bool> {
        self.values.get(&policy).copied().into()
    }

    pub fn is_enabled(&self, policy: BuildPolicy) -> bool {
        self.get(policy).value_or(false)
    }
}

/// What a package installed, as far as the checks care.
///
/// Directory enumeration happens elsewhere; this only records the result.
#[derive(Debug, Clone, Default)]
pub struct PackageLayout {
    include_files: Optional<Vec<String>>,
}

impl PackageLayout {
    /// A package without an `include` directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// A package whose `include` directory holds `files` (file names only).
    pub fn with_include_dir<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            include_files: Optional::new(files.into_iter().map(Into::into).collect()),
        }
    }

    /// File names directly under `include`, or empty if the directory is missing.
    pub fn include_files(&self) -> OptionalRef<'_, Vec<String>> {
        self.include_files.as_ref()
    }
}

/// Which restricted list a header name appears on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RestrictedHeader {
    /// From `/usr/include/<triplet>/sys/` on glibc systems
    System,
    /// From `/usr/include/` on glibc systems
    CRuntime,
    /// Generic names that have collided with other packages
    General,
}

const RESTRICTED_SYS_FILENAMES: &[&str] = &[
    "acct.h", "auxv.h", "bitypes.h", "cdefs.h", "debugreg.h", "dir.h", "elf.h", "epoll.h",
    "errno.h", "eventfd.h", "fanotify.h", "fcntl.h", "file.h", "fsuid.h", "gmon.h", "gmon_out.h",
    "inotify.h", "io.h", "ioctl.h", "ipc.h", "kd.h", "klog.h", "mman.h", "mount.h", "msg.h",
    "mtio.h", "param.h", "pci.h", "perm.h", "personality.h", "poll.h", "prctl.h", "procfs.h",
    "profil.h", "ptrace.h", "queue.h", "quota.h", "random.h", "raw.h", "reboot.h", "reg.h",
    "resource.h", "select.h", "sem.h", "sendfile.h", "shm.h", "signal.h", "signalfd.h",
    "socket.h", "socketvar.h", "soundcard.h", "stat.h", "statfs.h", "statvfs.h", "stropts.h",
    "swap.h", "syscall.h", "sysctl.h", "sysinfo.h", "syslog.h", "sysmacros.h", "termios.h",
    "time.h", "timeb.h", "timerfd.h", "times.h", "timex.h", "ttychars.h", "ttydefaults.h",
    "types.h", "ucontext.h", "uio.h", "un.h", "unistd.h", "user.h", "ustat.h", "utsname.h",
    "vfs.h", "vlimit.h", "vm86.h", "vt.h", "vtimes.h", "wait.h", "xattr.h",
];

const RESTRICTED_CRT_FILENAMES: &[&str] = &[
    "_G_config.h", "aio.h", "aliases.h", "alloca.h", "ar.h", "argp.h", "argz.h", "assert.h",
    "byteswap.h", "complex.h", "cpio.h", "crypt.h", "ctype.h", "dirent.h", "dlfcn.h", "elf.h",
    "endian.h", "envz.h", "err.h", "errno.h", "error.h", "execinfo.h", "fcntl.h", "features.h",
    "fenv.h", "fmtmsg.h", "fnmatch.h", "fstab.h", "fts.h", "ftw.h", "gconv.h", "getopt.h",
    "glob.h", "gnu-versions.h", "grp.h", "gshadow.h", "iconv.h", "ifaddrs.h", "inttypes.h",
    "langinfo.h", "lastlog.h", "libgen.h", "libintl.h", "libio.h", "limits.h", "link.h",
    "locale.h", "malloc.h", "math.h", "mcheck.h", "memory.h", "mntent.h", "monetary.h",
    "mqueue.h", "netash", "netdb.h", "nl_types.h", "nss.h", "obstack.h", "paths.h", "poll.h",
    "printf.h", "proc_service.h", "pthread.h", "pty.h", "pwd.h", "re_comp.h", "regex.h",
    "regexp.h", "resolv.h", "sched.h", "search.h", "semaphore.h", "setjmp.h", "sgtty.h",
    "shadow.h", "signal.h", "spawn.h", "stab.h", "stdc-predef.h", "stdint.h", "stdio.h",
    "stdio_ext.h", "stdlib.h", "string.h", "strings.h", "stropts.h", "syscall.h", "sysexits.h",
    "syslog.h", "tar.h", "termio.h", "termios.h", "tgmath.h", "thread_db.h", "time.h",
    "ttyent.h", "uchar.h", "ucontext.h", "ulimit.h", "unistd.h", "ustat.h", "utime.h", "utmp.h",
    "utmpx.h", "values.h", "wait.h", "wchar.h", "wctype.h", "wordexp.h",
];

const RESTRICTED_GENERAL_FILENAMES: &[&str] = &[
    "json.h",
    "parser.h",
    "lexer.h",
    "config.h",
    "local.h",
    "slice.h",
    "platform.h",
];

/// Looks up `file_name` on the restricted header lists.
pub fn restricted_header(file_name: &str) -> Optional<RestrictedHeader> {
    [
        (RestrictedHeader::System, RESTRICTED_SYS_FILENAMES),
        (RestrictedHeader::CRuntime, RESTRICTED_CRT_FILENAMES),
        (RestrictedHeader::General, RESTRICTED_GENERAL_FILENAMES),
    ]
    .into_iter()
    .find(|(_, names)| names.contains(&file_name))
    .map(|(kind, _)| kind)
    .into()
}

/// Inputs shared by every check of one run.
#[derive(Debug, Clone, Copy)]
pub struct LintContext<'a> {
    pub policies: &'a BuildPolicies,
    pub layout: &'a PackageLayout,
}

/// A single post-build check.
pub trait LintCheck: Send + Sync {
    fn name(&self) -> &'static str;

    /// Runs the check, sending any diagnostics to `console`.
    fn run(&self, context: &LintContext<'_>, console: &ConsoleHandle) -> LintStatus;
}

fn report(console: &ConsoleHandle, check: &'static str, message: Message) {
    if let Err(err) = console.print(message) {
        tracing::warn!(check, error = %err, "lint diagnostic dropped");
    }
}

/// `include` must be absent for CMake helper ports and non-empty for everything else.
#[derive(Debug, Clone, Copy, Default)]
pub struct IncludeDirectoryCheck;

impl LintCheck for IncludeDirectoryCheck {
    fn name(&self) -> &'static str {
        "include-directory"
    }

    fn run(&self, context: &LintContext<'_>, console: &ConsoleHandle) -> LintStatus {
        let include = context.layout.include_files();

        if context.policies.is_enabled(BuildPolicy::CmakeHelperPort) {
            if include.has_value() {
                report(
                    console,
                    self.name(),
                    Message::warning(
                        "The folder /include exists in a cmake helper port. This is incorrect \
                         since only cmake files should be installed.",
                    ),
                );
                return LintStatus::ProblemDetected;
            }
            return LintStatus::Success;
        }

        let populated = include.map(|files| !files.is_empty()).value_or(false);
        if !populated {
            report(
                console,
                self.name(),
                Message::warning(
                    "The folder /include is empty or not present. This indicates the package \
                     was not correctly installed.",
                ),
            );
            return LintStatus::ProblemDetected;
        }

        LintStatus::Success
    }
}

/// Flags headers that shadow the C runtime or other widely used names.
#[derive(Debug, Clone, Copy, Default)]
pub struct RestrictedHeadersCheck;

impl LintCheck for RestrictedHeadersCheck {
    fn name(&self) -> &'static str {
        "restricted-headers"
    }

    fn run(&self, context: &LintContext<'_>, console: &ConsoleHandle) -> LintStatus {
        if context.policies.is_enabled(BuildPolicy::AllowRestrictedHeaders) {
            return LintStatus::Success;
        }

        let mut violations: Vec<&str> = context
            .layout
            .include_files()
            .get()
            .map(|files| {
                files
                    .iter()
                    .map(String::as_str)
                    .filter(|name| restricted_header(name).has_value())
                    .collect()
            })
            .unwrap_or_default();

        if violations.is_empty() {
            return LintStatus::Success;
        }

        violations.sort_unstable();
        violations.dedup();

        let mut message = Message::warning(
            "Restricted header paths are present. These files can prevent the core C/C++ \
             runtime and other packages from compiling correctly:",
        );
        for name in violations {
            message = message.line(Color::Plain, format!("    include/{}", name));
        }
        message = message.line(
            Color::Plain,
            format!(
                "In exceptional circumstances, this policy can be disabled via {}",
                BuildPolicy::AllowRestrictedHeaders.cmake_variable()
            ),
        );
        report(console, self.name(), message);

        LintStatus::ProblemDetected
    }
}

/// Runs every post-build check for one package.
///
/// ```
/// use sovran_optional::{BuildPolicies, Console, PackageLayout, PostBuildLint};
///
/// let lint = PostBuildLint::new(BuildPolicies::new(), PackageLayout::with_include_dir(["zlib.h"]));
/// let console = Console::spawn(Vec::new(), false);
/// assert_eq!(lint.perform_all_checks(&console.handle()), 0);
/// assert!(console.finish()?.is_empty());
/// # Ok::<(), sovran_optional::LintError>(())
/// ```
pub struct PostBuildLint {
    policies: BuildPolicies,
    layout: PackageLayout,
    checks: Vec<Box<dyn LintCheck>>,
}

impl PostBuildLint {
    /// Creates a runner with the built-in checks.
    pub fn new(policies: BuildPolicies, layout: PackageLayout) -> Self {
        Self {
            policies,
            layout,
            checks: vec![Box::new(IncludeDirectoryCheck), Box::new(RestrictedHeadersCheck)],
        }
    }

    pub fn with_check<C>(mut self, check: C) -> Self
    where
        C: LintCheck + 'static,
    {
        self.checks.push(Box::new(check));
        self
    }

    /// Runs all checks concurrently and returns how many found a problem.
    ///
    /// Nothing runs for packages with [`BuildPolicy::EmptyPackage`] enabled.
    /// The count is produced only after every check has completed.
    pub fn perform_all_checks(&self, console: &ConsoleHandle) -> usize {
        if self.policies.is_enabled(BuildPolicy::EmptyPackage) {
            tracing::info!("empty package, skipping post-build checks");
            return 0;
        }

        let context = LintContext {
            policies: &self.policies,
            layout: &self.layout,
        };

        let statuses: Vec<LintStatus> = thread::scope(|scope| {
            let tasks: Vec<_> = self
                .checks
                .iter()
                .map(|check| {
                    let context = &context;
                    scope.spawn(move || {
                        let status = check.run(context, console);
                        tracing::debug!(check = check.name(), ?status, "lint check finished");
                        status
                    })
                })
                .collect();

            tasks
                .into_iter()
                .map(|task| {
                    task.join()
                        .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
                })
                .collect()
        });

        let error_count: usize = statuses.into_iter().sum();
        tracing::info!(error_count, checks = self.checks.len(), "post-build checks complete");
        error_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_keys_round_trip() {
        for policy in BuildPolicy::ALL {
            assert_eq!(BuildPolicy::from_config_key(policy.config_key()), Optional::new(policy));
        }
        assert!(!BuildPolicy::from_config_key("skip-dll-check").has_value());
    }

    #[test]
    fn test_unset_policy_is_absent() {
        let policies = BuildPolicies::new().with(BuildPolicy::CmakeHelperPort, false);
        assert_eq!(policies.get(BuildPolicy::CmakeHelperPort), Optional::new(false));
        assert!(!policies.get(BuildPolicy::EmptyPackage).has_value());
        assert!(!policies.is_enabled(BuildPolicy::EmptyPackage));
    }

    #[test]
    fn test_restricted_header_lookup() {
        assert_eq!(restricted_header("ioctl.h"), Optional::new(RestrictedHeader::System));
        assert_eq!(restricted_header("stdio.h"), Optional::new(RestrictedHeader::CRuntime));
        assert_eq!(restricted_header("json.h"), Optional::new(RestrictedHeader::General));
        assert!(!restricted_header("zlib.h").has_value());
    }

    #[test]
    fn test_status_sum_counts_problems() {
        let statuses = [
            LintStatus::Success,
            LintStatus::ProblemDetected,
            LintStatus::ProblemDetected,
        ];
        let count: usize = statuses.into_iter().sum();
        assert_eq!(count, 2);
    }
}
