#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use assert_fs::TempDir;
use assert_fs::prelude::*;
use filetime::FileTime;

/// A throwaway solution on disk with every file pinned to the same mtime.
pub struct SolutionFixture {
    temp_dir: TempDir,
    base: SystemTime,
    projects: Vec<String>,
}

impl SolutionFixture {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("failed to create temporary solution dir"),
            base: SystemTime::now() - Duration::from_secs(3600),
            projects: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn child(&self, relative: impl AsRef<Path>) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(relative)
    }

    pub fn base(&self) -> SystemTime {
        self.base
    }

    fn pinned(&self, relative: &str, content: &str) {
        let child = self.child(relative);
        child.write_str(content).unwrap();
        filetime::set_file_mtime(child.path(), FileTime::from_system_time(self.base)).unwrap();
    }

    /// Adds a framework-style project with a `Properties/AssemblyInfo.cs`.
    pub fn framework_project(mut self, name: &str, product: &str, shared: &str) -> Self {
        self.pinned(
            &format!("{name}/{name}.csproj"),
            &format!(
                "<?xml version=\"1.0\" encoding=\"utf-8\"?>\r\n\
                 <Project ToolsVersion=\"15.0\">\r\n  <ItemGroup>\r\n    \
                 <Compile Include=\"Program.cs\" />\r\n    \
                 <Compile Include=\"Views\\Main.cs\">\r\n      \
                 <DependentUpon>Views\\Main.xaml</DependentUpon>\r\n    \
                 </Compile>\r\n    \
                 <Compile Include=\"Properties\\AssemblyInfo.cs\" />\r\n  \
                 </ItemGroup>\r\n</Project>\r\n"
            ),
        );
        self.pinned(&format!("{name}/Program.cs"), "class Program {}\r\n");
        self.pinned(&format!("{name}/Views/Main.cs"), "partial class Main {}\r\n");
        self.pinned(&format!("{name}/Views/Main.xaml"), "<Window />\r\n");
        self.pinned(
            &format!("{name}/Properties/AssemblyInfo.cs"),
            &format!(
                "using System.Reflection;\r\n\r\n\
                 [assembly: AssemblyVersion(\"{shared}\")]\r\n\
                 [assembly: AssemblyFileVersion(\"{product}\")]\r\n"
            ),
        );
        self.projects.push(name.to_string());
        self
    }

    /// Adds an SDK-style project whose manifest holds both versions.
    pub fn sdk_project(mut self, name: &str, product: &str, shared: &str) -> Self {
        self.pinned(
            &format!("{name}/{name}.csproj"),
            &format!(
                "<Project Sdk=\"Microsoft.NET.Sdk\">\n  <PropertyGroup>\n    \
                 <TargetFramework>net8.0</TargetFramework>\n    \
                 <AssemblyVersion>{shared}</AssemblyVersion>\n    \
                 <FileVersion>{product}</FileVersion>\n  </PropertyGroup>\n</Project>\n"
            ),
        );
        self.pinned(&format!("{name}/Service.cs"), "class Service {}\n");
        self.pinned(&format!("{name}/bin/Debug/Stale.cs"), "\n");
        self.projects.push(name.to_string());
        self
    }

    /// Writes `App.sln` referencing every project added so far.
    pub fn build(self) -> Self {
        let mut content = String::from(
            "\u{feff}\r\nMicrosoft Visual Studio Solution File, Format Version 12.00\r\n",
        );
        for (index, name) in self.projects.iter().enumerate() {
            content.push_str(&format!(
                "Project(\"{{9A19103F-16F7-4668-BE54-9A1E7A4F7556}}\") = \"{name}\", \
                 \"{name}\\{name}.csproj\", \"{{1111111{index}-2222-3333-4444-555555555555}}\"\r\n\
                 EndProject\r\n"
            ));
        }
        content.push_str("Global\r\nEndGlobal\r\n");
        self.pinned("App.sln", &content);
        self
    }

    pub fn solution(&self) -> PathBuf {
        self.child("App.sln").path().to_path_buf()
    }

    pub fn manifest(&self, name: &str) -> PathBuf {
        self.child(&format!("{name}/{name}.csproj")).path().to_path_buf()
    }

    pub fn assembly_info(&self, name: &str) -> PathBuf {
        self.child(&format!("{name}/Properties/AssemblyInfo.cs"))
            .path()
            .to_path_buf()
    }

    /// Sets a file's mtime to `secs` seconds after the fixture's base time.
    pub fn edit(&self, relative: &str, secs: u64) -> SystemTime {
        let mtime = self.base + Duration::from_secs(secs);
        filetime::set_file_mtime(self.child(relative).path(), FileTime::from_system_time(mtime))
            .unwrap();
        mtime
    }
}

pub fn mtime(path: &Path) -> FileTime {
    FileTime::from_last_modification_time(&std::fs::metadata(path).unwrap())
}
